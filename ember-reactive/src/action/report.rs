/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::collections::BTreeSet;

use serde::Serialize;

/// One successful firing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_new::new)]
pub struct Firing {
    /// Name of the action that fired.
    pub action: &'static str,
    /// Position of the action in the priority list.
    pub priority: usize,
    /// Number of tokens consumed.
    pub consumed: usize,
    /// Number of tokens produced.
    pub produced: usize,
    /// Input ports left empty by this firing.
    pub exhausted: BTreeSet<String>,
}

/// Everything that fired during one call to the firing loop, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FireReport {
    firings: Vec<Firing>,
    exhausted: BTreeSet<String>,
}

impl FireReport {
    pub(crate) fn record(&mut self, firing: Firing) {
        self.exhausted.extend(firing.exhausted.iter().cloned());
        self.firings.push(firing);
    }

    /// `true` if at least one action fired.
    pub fn fired(&self) -> bool {
        !self.firings.is_empty()
    }

    /// The firings, oldest first.
    pub fn firings(&self) -> &[Firing] {
        &self.firings
    }

    /// Names of the actions that fired, oldest first.
    pub fn actions(&self) -> Vec<&'static str> {
        self.firings.iter().map(|firing| firing.action).collect()
    }

    /// Input ports emptied at some point during the call.
    pub fn exhausted(&self) -> &BTreeSet<String> {
        &self.exhausted
    }
}
