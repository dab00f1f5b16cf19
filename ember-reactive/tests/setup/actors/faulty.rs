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
use serde::Deserialize;

/// How [`Faulty`] misbehaves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultMode {
    /// Sums its two inputs, as declared.
    #[default]
    Sound,
    /// Returns an error from the body.
    Fail,
    /// Produces two values for its single declared output.
    WrongArity,
    /// Reports a firing without producing the declared output.
    NoOutput,
}

/// Reads two tokens from `x` and writes their sum to `y`, unless configured
/// to misbehave.
#[ember_actor]
pub struct Faulty {
    mode: FaultMode,
    #[managed]
    pub merged: u64,
}

impl Faulty {
    fn merge(&mut self, _ctx: &mut ActorContext, inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        let sum: i64 = inputs.iter().filter_map(Value::as_i64).sum();
        match self.mode {
            FaultMode::Sound => {
                self.merged += 1;
                Ok(ActionResult::one(sum))
            }
            FaultMode::Fail => anyhow::bail!("merge exploded"),
            FaultMode::WrongArity => Ok(ActionResult::produced([sum, sum])),
            FaultMode::NoOutput => Ok(ActionResult::fired()),
        }
    }
}

impl Actor for Faulty {
    const TYPE_NAME: &'static str = "Faulty";
    type Config = FaultMode;

    fn init(&mut self, _ctx: &mut ActorContext, mode: FaultMode) -> anyhow::Result<()> {
        self.mode = mode;
        Ok(())
    }

    fn action_priority() -> Vec<Action<Self>> {
        vec![Action::new("merge", Self::merge).input_n("x", 2).output("y")]
    }
}

/// Declares outputs `a` and `b` but only ever produces one value.
#[ember_actor]
pub struct Splitter;

impl Splitter {
    fn split(&mut self, _ctx: &mut ActorContext, inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        Ok(ActionResult::Produced(inputs))
    }
}

impl Actor for Splitter {
    const TYPE_NAME: &'static str = "Splitter";
    type Config = ();

    fn action_priority() -> Vec<Action<Self>> {
        vec![Action::new("split", Self::split).input("in").output("a").output("b")]
    }
}
