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

use ember_core::actor_ref::ActorRef;
use ember_core::capability::{Capabilities, CapabilityHandle};
use ember_core::error::CapabilityError;
use serde_json::Value;

/// Runtime services available to an actor's guards, bodies and hooks.
///
/// Holds the actor's identity and its open capability objects. Capability
/// handles are opened here and stored in the actor's (unmanaged) fields; the
/// objects themselves never leave the context, so they cannot end up in a
/// snapshot.
#[derive(Debug)]
pub struct ActorContext {
    capabilities: Capabilities,
}

impl ActorContext {
    pub(crate) const fn new(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }

    /// The actor this context belongs to.
    #[inline]
    pub const fn actor_ref(&self) -> &ActorRef {
        self.capabilities.actor()
    }

    /// Opens a capability by registered name.
    pub fn open(&mut self, name: &str, config: Value) -> Result<CapabilityHandle, CapabilityError> {
        self.capabilities.open(name, config)
    }

    /// Returns `true` if the capability has data to read.
    pub fn can_read(&self, handle: &CapabilityHandle) -> bool {
        self.capabilities.can_read(handle)
    }

    /// Returns `true` if the capability accepts a write.
    pub fn can_write(&self, handle: &CapabilityHandle) -> bool {
        self.capabilities.can_write(handle)
    }

    /// Reads from a capability.
    pub fn read(&mut self, handle: &CapabilityHandle) -> Result<Value, CapabilityError> {
        self.capabilities.read(handle)
    }

    /// Writes to a capability.
    pub fn write(&mut self, handle: &CapabilityHandle, value: Value) -> Result<(), CapabilityError> {
        self.capabilities.write(handle, value)
    }

    /// Closes a capability. Returns `false` if it was not open.
    pub fn close(&mut self, handle: &CapabilityHandle) -> bool {
        self.capabilities.close(handle)
    }

    /// Handles still open, oldest first.
    pub fn open_handles(&self) -> Vec<CapabilityHandle> {
        self.capabilities.open_handles()
    }

    pub(crate) fn close_all(&mut self) -> Vec<CapabilityHandle> {
        self.capabilities.close_all()
    }
}
