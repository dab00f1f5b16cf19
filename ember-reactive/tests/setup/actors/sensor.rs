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

/// Keeps the latest reading from `in` and the one before it.
#[ember_actor]
pub struct Sensor {
    #[managed]
    pub reading: f64,
    #[managed]
    pub last: Option<f64>,
}

impl Sensor {
    fn sample(&mut self, _ctx: &mut ActorContext, inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        self.last = Some(self.reading);
        self.reading = inputs[0].as_f64().unwrap_or_default();
        Ok(ActionResult::fired())
    }
}

impl Actor for Sensor {
    const TYPE_NAME: &'static str = "Sensor";
    type Config = ();

    fn action_priority() -> Vec<Action<Self>> {
        vec![Action::new("sample", Self::sample).input("in")]
    }
}
