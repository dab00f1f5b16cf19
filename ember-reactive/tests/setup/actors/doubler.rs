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

use anyhow::anyhow;
use ember_reactive::prelude::*;

/// Reads one number from `in` and emits twice its value on `out`.
#[ember_actor]
pub struct Doubler {
    #[managed]
    pub fired: u64,
}

impl Doubler {
    fn double(&mut self, _ctx: &mut ActorContext, inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        let n = inputs[0].as_i64().ok_or_else(|| anyhow!("expected a number, got {}", inputs[0]))?;
        self.fired += 1;
        Ok(ActionResult::one(n * 2))
    }
}

impl Actor for Doubler {
    const TYPE_NAME: &'static str = "Doubler";
    type Config = ();

    fn action_priority() -> Vec<Action<Self>> {
        vec![Action::new("double", Self::double).input("in").output("out")]
    }
}
