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

use ember_core::port_store::PortStore;
use tracing::{debug, instrument};

use crate::action::selector;
use crate::action::FireReport;
use crate::actor::ManagedActor;
use crate::common::{FiringError, LifecycleError, SnapshotError};
use crate::snapshot::ActorSnapshot;
use crate::traits::Actor;

/// Type-state marker for a [`ManagedActor`] that has been initialised or
/// restored and may be fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Active;

impl<A: Actor> ManagedActor<Active, A> {
    /// Fires the actor until a full scan of its actions fires nothing.
    ///
    /// Returns `true` if at least one action fired. After every firing the
    /// scan restarts from the highest-priority action. There is no iteration
    /// cap: an actor whose actions keep re-enabling themselves on ports it is
    /// fed from never returns.
    ///
    /// # Errors
    ///
    /// Any [`FiringError`] stops the loop. Firings that completed before it
    /// stay committed; the failing action's inputs are left queued.
    pub fn fire<P: PortStore + ?Sized>(&mut self, ports: &mut P) -> Result<bool, FiringError> {
        Ok(self.fire_with_report(ports)?.fired())
    }

    /// Like [`fire`](Self::fire), but reports every firing in order.
    #[instrument(skip_all, fields(actor = %self.actor_ref()), level = "debug")]
    pub fn fire_with_report<P: PortStore + ?Sized>(&mut self, ports: &mut P) -> Result<FireReport, FiringError> {
        let mut report = FireReport::default();
        while let Some(firing) = selector::select(&self.actions, &mut self.model, &mut self.context, ports)? {
            report.record(firing);
        }
        debug!(firings = report.firings().len(), "Reached fixed point");
        Ok(report)
    }

    /// Captures the managed state.
    ///
    /// Taking two snapshots with no firing in between yields equal values.
    pub fn snapshot(&self) -> Result<ActorSnapshot, SnapshotError> {
        Ok(ActorSnapshot {
            actor_type: A::TYPE_NAME.to_string(),
            actor: self.actor_ref().clone(),
            managed: self.model.state()?,
        })
    }

    /// Runs `will_migrate` ahead of relocation.
    ///
    /// Handles the hook left open are force-closed when
    /// `lifecycle.close_leaked_capabilities` is set.
    pub fn will_migrate(&mut self) -> Result<(), LifecycleError> {
        self.run_hook("will_migrate", A::will_migrate, true)
    }

    /// Runs `did_migrate`, e.g. to re-acquire capabilities after a relocation
    /// was aborted and the actor stays on this host.
    pub fn did_migrate(&mut self) -> Result<(), LifecycleError> {
        self.run_hook("did_migrate", A::did_migrate, false)
    }

    /// Runs `will_end` and discards the actor.
    ///
    /// Capabilities still open afterwards are handled as in
    /// [`will_migrate`](Self::will_migrate).
    pub fn end(mut self) -> Result<(), LifecycleError> {
        self.run_hook("will_end", A::will_end, true)
    }
}
