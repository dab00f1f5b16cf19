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

use ember_reactive::prelude::*;

/// Running statistics kept as nested managed state.
#[derive(Debug, Default, Clone, PartialEq, ManagedState)]
pub struct Stats {
    #[managed]
    pub count: u64,
    #[managed]
    pub max: Option<i64>,
}

/// Adds every number from `in` to a running total emitted on `sum`.
#[ember_actor]
pub struct Accumulator {
    #[managed]
    pub total: i64,
    #[managed(nested)]
    pub stats: Stats,
    /// Not managed: lost on relocation.
    pub history: Vec<i64>,
}

impl Accumulator {
    fn add(&mut self, _ctx: &mut ActorContext, inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        let n = inputs[0].as_i64().unwrap_or_default();
        self.total += n;
        self.stats.count += 1;
        self.stats.max = Some(self.stats.max.map_or(n, |max| max.max(n)));
        self.history.push(n);
        Ok(ActionResult::one(self.total))
    }
}

impl Actor for Accumulator {
    const TYPE_NAME: &'static str = "Accumulator";
    type Config = ();

    fn action_priority() -> Vec<Action<Self>> {
        vec![Action::new("add", Self::add).input("in").output("sum")]
    }
}
