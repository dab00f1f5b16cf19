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

use std::fmt::Debug;

use ember_core::token::ExceptionToken;
use serde::de::DeserializeOwned;

use crate::action::{Action, ActionResult};
use crate::actor::ActorContext;
use crate::traits::ManagedState;

/// An actor type: its identity, its fixed action priority list and its
/// lifecycle hooks.
///
/// Capability handles opened in [`init`](Actor::init) or
/// [`did_migrate`](Actor::did_migrate) are expected to be closed again in
/// [`will_migrate`](Actor::will_migrate) and [`will_end`](Actor::will_end).
pub trait Actor: ManagedState + Default + Debug + Send + Sized + 'static {
    /// Name recorded in snapshots; a snapshot only restores into the same type.
    const TYPE_NAME: &'static str;

    /// Capability names that must be registered before the actor is created.
    const REQUIRES: &'static [&'static str] = &[];

    /// Initial configuration passed to [`init`](Actor::init).
    type Config: DeserializeOwned;

    /// The actions of this type, highest priority first.
    ///
    /// Called once when the actor is created.
    fn action_priority() -> Vec<Action<Self>>;

    /// Runs exactly once, before the first firing of a new actor.
    fn init(&mut self, _ctx: &mut ActorContext, _config: Self::Config) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs before the actor's managed state is captured for relocation.
    fn will_migrate(&mut self, _ctx: &mut ActorContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after managed state has been restored, to re-acquire capabilities.
    fn did_migrate(&mut self, _ctx: &mut ActorContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs once before the actor is discarded.
    fn will_end(&mut self, _ctx: &mut ActorContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called instead of the action body when a peeked token is an exception.
    ///
    /// The returned result is validated and committed like a body result. The
    /// default leaves the token queued and fails the firing.
    fn exception_handler(
        &mut self,
        _ctx: &mut ActorContext,
        _action: &'static str,
        exception: &ExceptionToken,
    ) -> anyhow::Result<ActionResult> {
        anyhow::bail!("{exception} NOT HANDLED")
    }
}
