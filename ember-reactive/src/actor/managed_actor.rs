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
use std::fmt::Debug;
use std::fmt::Formatter;
use std::marker::PhantomData;

use ember_core::actor_ref::ActorRef;
use ember_core::config::CONFIG;
use tracing::warn;

pub use active::Active;
pub use idle::Idle;

use crate::action::Action;
use crate::actor::ActorContext;
use crate::common::LifecycleError;
use crate::traits::Actor;

/// Contains the `Active` type-state marker and the firing loop.
pub mod active;
mod idle;

/// An actor instance together with its runtime context.
///
/// `ManagedActor` uses a type-state parameter to keep lifecycle calls in order:
/// an [`Idle`] actor has been created and had its required capabilities
/// checked, but has not run `init`; an [`Active`] actor can be fired,
/// snapshotted and relocated. Ending an actor consumes it.
///
/// # Type Parameters
///
/// *   `State`: The type-state marker ([`Idle`] or [`Active`]).
/// *   `A`: The user-defined actor type.
pub struct ManagedActor<State, A: Actor> {
    /// Identity and capability handles.
    pub(crate) context: ActorContext,

    /// The user-defined state and logic associated with this actor.
    pub model: A,

    /// The action priority list, fixed at construction.
    pub(crate) actions: Vec<Action<A>>,

    _state: PhantomData<State>,
}

impl<State, A: Actor> ManagedActor<State, A> {
    /// Returns the actor's identity.
    #[inline]
    pub const fn actor_ref(&self) -> &ActorRef {
        self.context.actor_ref()
    }

    /// Returns the actor's runtime context.
    #[inline]
    pub const fn context(&self) -> &ActorContext {
        &self.context
    }

    /// Returns the action priority list, highest priority first.
    pub fn actions(&self) -> &[Action<A>] {
        &self.actions
    }

    fn into_state<Next>(self) -> ManagedActor<Next, A> {
        ManagedActor {
            context: self.context,
            model: self.model,
            actions: self.actions,
            _state: PhantomData,
        }
    }

    /// Runs a lifecycle hook, then deals with any capability left open.
    fn run_hook(
        &mut self,
        hook: &'static str,
        run: fn(&mut A, &mut ActorContext) -> anyhow::Result<()>,
        close_leaked: bool,
    ) -> Result<(), LifecycleError> {
        let result = run(&mut self.model, &mut self.context).map_err(|source| LifecycleError::Hook {
            actor: self.context.actor_ref().clone(),
            hook,
            source,
        });
        if close_leaked {
            self.close_leaked(hook);
        }
        result
    }

    fn close_leaked(&mut self, hook: &'static str) {
        let leaked = self.context.open_handles();
        if leaked.is_empty() {
            return;
        }
        if CONFIG.lifecycle.close_leaked_capabilities {
            for handle in self.context.close_all() {
                warn!(actor = %self.context.actor_ref(), %handle, hook, "Closed capability left open");
            }
        } else {
            for handle in leaked {
                warn!(actor = %self.context.actor_ref(), %handle, hook, "Capability left open");
            }
        }
    }
}

impl<State, A: Actor> Debug for ManagedActor<State, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedActor")
            .field("actor", self.context.actor_ref())
            .field("model", &self.model)
            .field("state", &std::any::type_name::<State>())
            .finish_non_exhaustive()
    }
}
