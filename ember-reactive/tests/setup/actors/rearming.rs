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

/// `consume` arms `prime`, which sits above it; `fallback` would take the same
/// input if the scan did not start over after a firing.
#[ember_actor]
pub struct Rearming {
    #[managed]
    pub armed: bool,
}

impl Rearming {
    fn prime(&mut self, _ctx: &mut ActorContext, _inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        self.armed = false;
        Ok(ActionResult::one("prime"))
    }

    fn consume(&mut self, _ctx: &mut ActorContext, inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        self.armed = true;
        Ok(ActionResult::one(inputs[0].clone()))
    }

    fn fallback(&mut self, _ctx: &mut ActorContext, _inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        Ok(ActionResult::one("fallback"))
    }
}

impl Actor for Rearming {
    const TYPE_NAME: &'static str = "Rearming";
    type Config = ();

    fn action_priority() -> Vec<Action<Self>> {
        vec![
            Action::new("prime", Self::prime)
                .guard(|actor, _| actor.armed)
                .output("out"),
            Action::new("consume", Self::consume)
                .guard(|actor, _| !actor.armed)
                .input("in")
                .output("out"),
            Action::new("fallback", Self::fallback).input("in").output("out"),
        ]
    }
}
