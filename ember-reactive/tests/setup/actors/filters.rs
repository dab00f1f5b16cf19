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

/// Passes even numbers from `in` to `out`; odd numbers stay queued.
#[ember_actor]
pub struct EvenPass;

impl EvenPass {
    pub fn is_even(&self, _ctx: &ActorContext, inputs: &[Value]) -> bool {
        inputs[0].as_i64().is_some_and(|n| n % 2 == 0)
    }

    pub fn pass(&mut self, _ctx: &mut ActorContext, inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        Ok(ActionResult::Produced(inputs))
    }
}

impl Actor for EvenPass {
    const TYPE_NAME: &'static str = "EvenPass";
    type Config = ();

    fn action_priority() -> Vec<Action<Self>> {
        vec![Action::new("pass", Self::pass)
            .when_inputs(Self::is_even)
            .input("in")
            .output("out")]
    }
}

/// Forwards `in` to `out` while open; the body declines otherwise.
#[ember_actor]
pub struct Gate {
    #[managed]
    pub open: bool,
}

impl Gate {
    fn forward(&mut self, _ctx: &mut ActorContext, inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        if !self.open {
            return Ok(ActionResult::declined());
        }
        Ok(ActionResult::Produced(inputs))
    }
}

impl Actor for Gate {
    const TYPE_NAME: &'static str = "Gate";
    type Config = ();

    fn action_priority() -> Vec<Action<Self>> {
        vec![Action::new("forward", Self::forward).input("in").output("out")]
    }
}

/// Like a pass-through, but turns exception tokens into a report on `out`.
#[ember_actor]
pub struct Resilient {
    #[managed]
    pub recovered: Vec<String>,
}

impl Resilient {
    fn pass(&mut self, _ctx: &mut ActorContext, inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        Ok(ActionResult::Produced(inputs))
    }
}

impl Actor for Resilient {
    const TYPE_NAME: &'static str = "Resilient";
    type Config = ();

    fn action_priority() -> Vec<Action<Self>> {
        vec![Action::new("pass", Self::pass).input("in").output("out")]
    }

    fn exception_handler(
        &mut self,
        _ctx: &mut ActorContext,
        _action: &'static str,
        exception: &ExceptionToken,
    ) -> anyhow::Result<ActionResult> {
        self.recovered.push(exception.reason.clone());
        Ok(ActionResult::one(json!({ "recovered": exception.reason })))
    }
}
