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

//! Capabilities: named access to the outside world.
//!
//! A capability is an object opened by an actor (a timer, a sensor, an HTTP
//! client, ...) and polled from guards through `can_read`/`can_write`. Actual
//! I/O happens outside the firing loop; an action body only moves data that is
//! already available.
//!
//! Capabilities are resolved through a [`CapabilityRegistry`] populated at
//! startup. Each actor gets a [`Capabilities`] table holding the objects it has
//! opened, addressed by [`CapabilityHandle`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, trace};

use crate::actor_ref::ActorRef;
use crate::error::CapabilityError;

/// An open capability object.
///
/// Every method must return promptly; `can_read`/`can_write` are polled from
/// guards on every scan of the action list.
pub trait Capability: Send + fmt::Debug {
    /// Returns `true` if [`read`](Capability::read) would yield data now.
    fn can_read(&self) -> bool {
        false
    }

    /// Returns `true` if [`write`](Capability::write) would be accepted now.
    fn can_write(&self) -> bool {
        false
    }

    /// Takes the next available value.
    fn read(&mut self) -> anyhow::Result<Value> {
        anyhow::bail!("read is not supported")
    }

    /// Hands a value to the capability.
    fn write(&mut self, _value: Value) -> anyhow::Result<()> {
        anyhow::bail!("write is not supported")
    }

    /// Releases any resources held by the object.
    fn close(&mut self) {}
}

/// Constructor registered for a capability name.
///
/// Receives the opening actor and the configuration passed to `open`.
pub type CapabilityFactory =
    Arc<dyn Fn(&ActorRef, &Value) -> anyhow::Result<Box<dyn Capability>> + Send + Sync>;

/// Startup-time mapping from capability names to factories.
///
/// Cloning shares the underlying table.
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    factories: Arc<DashMap<String, CapabilityFactory>>,
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.factories.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        f.debug_struct("CapabilityRegistry").field("capabilities", &names).finish()
    }
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `name`.
    pub fn register<F>(&self, name: impl Into<String>, factory: F) -> Result<(), CapabilityError>
    where
        F: Fn(&ActorRef, &Value) -> anyhow::Result<Box<dyn Capability>> + Send + Sync + 'static,
    {
        let name = name.into();
        match self.factories.entry(name.clone()) {
            Entry::Occupied(_) => Err(CapabilityError::AlreadyRegistered(name)),
            Entry::Vacant(slot) => {
                debug!(capability = %name, "Registering capability");
                slot.insert(Arc::new(factory));
                Ok(())
            }
        }
    }

    /// Removes the factory registered under `name`. Returns `true` if one existed.
    pub fn unregister(&self, name: &str) -> bool {
        self.factories.remove(name).is_some()
    }

    /// Returns `true` if a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Checks that every name is registered, failing on the first one that is not.
    pub fn require_all(&self, names: &[&str]) -> Result<(), CapabilityError> {
        match names.iter().find(|name| !self.contains(name)) {
            Some(missing) => Err(CapabilityError::NotFound((*missing).to_string())),
            None => Ok(()),
        }
    }

    fn resolve(&self, name: &str) -> Result<CapabilityFactory, CapabilityError> {
        self.factories
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| CapabilityError::NotFound(name.to_string()))
    }

    /// Creates an empty handle table for `actor`.
    #[must_use]
    pub fn bind(&self, actor: ActorRef) -> Capabilities {
        Capabilities {
            actor,
            registry: self.clone(),
            objects: BTreeMap::new(),
            next_id: 0,
        }
    }
}

/// Reference to an object opened through [`Capabilities::open`].
///
/// Handles may be stored in actor state, but must never be part of managed
/// state: the object they point to does not survive relocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CapabilityHandle {
    name: String,
    id: u64,
}

impl CapabilityHandle {
    /// Name of the capability this handle was opened from.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for CapabilityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

/// The capability objects opened by one actor.
#[derive(Debug)]
pub struct Capabilities {
    actor: ActorRef,
    registry: CapabilityRegistry,
    objects: BTreeMap<CapabilityHandle, Box<dyn Capability>>,
    next_id: u64,
}

impl Capabilities {
    /// The actor owning this table.
    #[inline]
    pub const fn actor(&self) -> &ActorRef {
        &self.actor
    }

    /// Opens the capability registered under `name`.
    pub fn open(&mut self, name: &str, config: Value) -> Result<CapabilityHandle, CapabilityError> {
        let factory = self.registry.resolve(name)?;
        let object = factory(&self.actor, &config).map_err(|source| {
            error!(actor = %self.actor, capability = name, "Failed to open capability: {source:#}");
            CapabilityError::OpenFailed {
                name: name.to_string(),
                source,
            }
        })?;
        let handle = CapabilityHandle {
            name: name.to_string(),
            id: self.next_id,
        };
        self.next_id += 1;
        debug!(actor = %self.actor, %handle, "Opened capability");
        self.objects.insert(handle.clone(), object);
        Ok(handle)
    }

    /// Returns `true` if the object can be read now; unknown handles are never ready.
    pub fn can_read(&self, handle: &CapabilityHandle) -> bool {
        self.objects.get(handle).is_some_and(|object| object.can_read())
    }

    /// Returns `true` if the object accepts a write now; unknown handles are never ready.
    pub fn can_write(&self, handle: &CapabilityHandle) -> bool {
        self.objects.get(handle).is_some_and(|object| object.can_write())
    }

    /// Reads the next value from the object.
    pub fn read(&mut self, handle: &CapabilityHandle) -> Result<Value, CapabilityError> {
        let object = self.object_mut(handle)?;
        if !object.can_read() {
            return Err(CapabilityError::NotReadable(handle.to_string()));
        }
        object.read().map_err(|source| CapabilityError::Io {
            name: handle.name.clone(),
            source,
        })
    }

    /// Writes a value to the object.
    pub fn write(&mut self, handle: &CapabilityHandle, value: Value) -> Result<(), CapabilityError> {
        let object = self.object_mut(handle)?;
        if !object.can_write() {
            return Err(CapabilityError::NotWritable(handle.to_string()));
        }
        object.write(value).map_err(|source| CapabilityError::Io {
            name: handle.name.clone(),
            source,
        })
    }

    /// Closes the object. Returns `false` if the handle was not open.
    pub fn close(&mut self, handle: &CapabilityHandle) -> bool {
        match self.objects.remove(handle) {
            Some(mut object) => {
                object.close();
                debug!(actor = %self.actor, %handle, "Closed capability");
                true
            }
            None => {
                trace!(actor = %self.actor, %handle, "Close of unknown capability handle ignored");
                false
            }
        }
    }

    /// Closes every open object and returns the handles that were closed.
    pub fn close_all(&mut self) -> Vec<CapabilityHandle> {
        let objects = std::mem::take(&mut self.objects);
        objects
            .into_iter()
            .map(|(handle, mut object)| {
                object.close();
                debug!(actor = %self.actor, %handle, "Closed capability");
                handle
            })
            .collect()
    }

    /// Handles of every open object, in opening order.
    pub fn open_handles(&self) -> Vec<CapabilityHandle> {
        let mut handles: Vec<CapabilityHandle> = self.objects.keys().cloned().collect();
        handles.sort_by_key(|handle| handle.id);
        handles
    }

    fn object_mut(&mut self, handle: &CapabilityHandle) -> Result<&mut Box<dyn Capability>, CapabilityError> {
        self.objects
            .get_mut(handle)
            .ok_or_else(|| CapabilityError::UnknownHandle(handle.to_string()))
    }
}
