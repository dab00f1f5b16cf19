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

use std::marker::PhantomData;

use ember_core::actor_ref::ActorRef;
use ember_core::capability::CapabilityRegistry;
use ember_core::error::CapabilityError;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::actor::{Active, ActorContext, ManagedActor};
use crate::common::{LifecycleError, SnapshotError};
use crate::snapshot::ActorSnapshot;
use crate::traits::Actor;

/// Type-state marker for a [`ManagedActor`] that has been created but not yet
/// initialised or restored.
///
/// An idle actor becomes [`Active`] exactly once, through either
/// [`ManagedActor::init`] (a new actor) or [`ManagedActor::restore`] (an actor
/// arriving from another host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Idle;

impl<A: Actor> ManagedActor<Idle, A> {
    /// Creates an actor of type `A`.
    ///
    /// Fails with [`CapabilityError::NotFound`] if any name in `A::REQUIRES`
    /// is not registered.
    #[instrument(skip(registry), fields(actor_type = A::TYPE_NAME), level = "debug")]
    pub fn new(actor_ref: ActorRef, registry: &CapabilityRegistry) -> Result<Self, CapabilityError> {
        registry.require_all(A::REQUIRES)?;
        let actions = A::action_priority();
        debug!(%actor_ref, actions = actions.len(), "Created actor");
        Ok(Self {
            context: ActorContext::new(registry.bind(actor_ref)),
            model: A::default(),
            actions,
            _state: PhantomData,
        })
    }

    /// Runs `init` with the given configuration and activates the actor.
    #[instrument(skip_all, fields(actor = %self.actor_ref()), level = "debug")]
    pub fn init(mut self, config: A::Config) -> Result<ManagedActor<Active, A>, LifecycleError> {
        self.model
            .init(&mut self.context, config)
            .map_err(|source| LifecycleError::Hook {
                actor: self.actor_ref().clone(),
                hook: "init",
                source,
            })?;
        Ok(self.into_state())
    }

    /// Decodes a portable configuration value, then behaves like [`init`](Self::init).
    pub fn init_with(self, config: Value) -> Result<ManagedActor<Active, A>, LifecycleError> {
        let config = serde_json::from_value(config).map_err(|source| LifecycleError::Config {
            actor: self.actor_ref().clone(),
            source,
        })?;
        self.init(config)
    }

    /// Restores managed state captured on another host, runs `did_migrate`
    /// and activates the actor. `init` is not run.
    #[instrument(skip_all, fields(actor = %self.actor_ref()), level = "debug")]
    pub fn restore(mut self, snapshot: ActorSnapshot) -> Result<ManagedActor<Active, A>, LifecycleError> {
        if snapshot.actor_type != A::TYPE_NAME {
            return Err(SnapshotError::TypeMismatch {
                expected: A::TYPE_NAME,
                found: snapshot.actor_type,
            }
            .into());
        }
        if &snapshot.actor != self.actor_ref() {
            warn!(from = %snapshot.actor, "Restoring state captured from another actor");
        }
        self.model.set_state(snapshot.managed)?;
        self.run_hook("did_migrate", A::did_migrate, false)?;
        Ok(self.into_state())
    }
}
