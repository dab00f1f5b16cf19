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

/// Configuration passed to [`Fetcher::init`](Actor::init).
#[derive(Debug, Default, Deserialize)]
pub struct FetcherConfig {
    pub timeout_ms: u64,
}

/// Issues a request per URL on `url` and emits each response on `data`.
///
/// The response is buffered in managed state between the action that reads it
/// from the capability and the action that emits it.
#[ember_actor]
pub struct Fetcher {
    #[managed]
    pub timeout_ms: u64,
    #[managed]
    pub requests: u64,
    #[managed]
    pub response: Option<Value>,
    pub handle: Option<CapabilityHandle>,
}

impl Fetcher {
    pub const CAPABILITY: &'static str = "net.http";

    fn open(&mut self, ctx: &mut ActorContext) -> anyhow::Result<()> {
        let handle = ctx.open(Self::CAPABILITY, json!({ "timeout_ms": self.timeout_ms }))?;
        self.handle = Some(handle);
        Ok(())
    }

    fn close(&mut self, ctx: &mut ActorContext) {
        if let Some(handle) = self.handle.take() {
            ctx.close(&handle);
        }
    }

    fn readable(&self, ctx: &ActorContext) -> bool {
        self.response.is_none() && self.handle.as_ref().is_some_and(|handle| ctx.can_read(handle))
    }

    fn writable(&self, ctx: &ActorContext) -> bool {
        self.handle.as_ref().is_some_and(|handle| ctx.can_write(handle))
    }

    fn emit(&mut self, _ctx: &mut ActorContext, _inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        Ok(ActionResult::Produced(self.response.take().into_iter().collect()))
    }

    fn receive(&mut self, ctx: &mut ActorContext, _inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        if let Some(handle) = &self.handle {
            self.response = Some(ctx.read(handle)?);
        }
        Ok(ActionResult::fired())
    }

    fn request(&mut self, ctx: &mut ActorContext, inputs: Vec<Value>) -> anyhow::Result<ActionResult> {
        if let Some(handle) = &self.handle {
            ctx.write(handle, inputs[0].clone())?;
            self.requests += 1;
        }
        Ok(ActionResult::fired())
    }
}

impl Actor for Fetcher {
    const TYPE_NAME: &'static str = "Fetcher";
    const REQUIRES: &'static [&'static str] = &[Self::CAPABILITY];
    type Config = FetcherConfig;

    fn action_priority() -> Vec<Action<Self>> {
        vec![
            Action::new("emit", Self::emit)
                .guard(|fetcher, _| fetcher.response.is_some())
                .output("data"),
            Action::new("receive", Self::receive).guard(Self::readable),
            Action::new("request", Self::request)
                .guard(Self::writable)
                .input("url"),
        ]
    }

    fn init(&mut self, ctx: &mut ActorContext, config: FetcherConfig) -> anyhow::Result<()> {
        self.timeout_ms = config.timeout_ms;
        self.open(ctx)
    }

    fn will_migrate(&mut self, ctx: &mut ActorContext) -> anyhow::Result<()> {
        self.close(ctx);
        Ok(())
    }

    fn did_migrate(&mut self, ctx: &mut ActorContext) -> anyhow::Result<()> {
        self.open(ctx)
    }

    fn will_end(&mut self, ctx: &mut ActorContext) -> anyhow::Result<()> {
        self.close(ctx);
        Ok(())
    }
}

/// Opens a timer in `init` and never closes it.
#[ember_actor]
pub struct Leaky {
    pub timer: Option<CapabilityHandle>,
}

impl Leaky {
    pub const CAPABILITY: &'static str = "io.timer";
}

impl Actor for Leaky {
    const TYPE_NAME: &'static str = "Leaky";
    const REQUIRES: &'static [&'static str] = &[Self::CAPABILITY];
    type Config = ();

    fn action_priority() -> Vec<Action<Self>> {
        Vec::new()
    }

    fn init(&mut self, ctx: &mut ActorContext, _config: ()) -> anyhow::Result<()> {
        self.timer = Some(ctx.open(Self::CAPABILITY, Value::Null)?);
        Ok(())
    }
}
