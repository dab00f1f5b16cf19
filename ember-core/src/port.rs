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

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a port relative to its actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortDirection {
    /// Tokens flow into the actor.
    In,
    /// Tokens flow out of the actor.
    Out,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => f.write_str("in"),
            Self::Out => f.write_str("out"),
        }
    }
}

/// A port name paired with a token count, as declared by an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_new::new)]
pub struct PortCount {
    /// Port name, unique within its actor and direction.
    pub port: &'static str,
    /// Number of tokens read from or written to the port per firing.
    pub count: usize,
}

/// Sums the counts of repeated port names, keeping first-seen order.
///
/// Availability checks must ask for the total demand on a port, not for each
/// declaration separately.
pub fn aggregate(counts: &[PortCount]) -> Vec<PortCount> {
    let mut totals: Vec<PortCount> = Vec::with_capacity(counts.len());
    for entry in counts {
        match totals.iter_mut().find(|total| total.port == entry.port) {
            Some(total) => total.count += entry.count,
            None => totals.push(*entry),
        }
    }
    totals
}
