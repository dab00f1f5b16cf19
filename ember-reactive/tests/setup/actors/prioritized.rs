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

/// Three actions, `a` > `b` > `c`, each fed from its own port and labelling
/// its output with its name.
#[ember_actor]
pub struct Prioritized {
    #[managed]
    pub log: Vec<String>,
}

impl Prioritized {
    fn label(&mut self, name: &str) -> anyhow::Result<ActionResult> {
        self.log.push(name.to_string());
        Ok(ActionResult::one(name))
    }

    fn a(&mut self, _ctx: &mut ActorContext, _inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        self.label("a")
    }

    fn b(&mut self, _ctx: &mut ActorContext, _inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        self.label("b")
    }

    fn c(&mut self, _ctx: &mut ActorContext, _inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        self.label("c")
    }
}

impl Actor for Prioritized {
    const TYPE_NAME: &'static str = "Prioritized";
    type Config = ();

    fn action_priority() -> Vec<Action<Self>> {
        vec![
            Action::new("a", Self::a).input("a").output("out"),
            Action::new("b", Self::b).input("b").output("out"),
            Action::new("c", Self::c).input("c").output("out"),
        ]
    }
}
