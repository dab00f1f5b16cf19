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

#![forbid(unsafe_code)]
#![warn(missing_docs)]
//! Ember Core Library
//!
//! The collaborators consumed by the Ember firing engine: tokens, bounded port
//! queues with a tentative read cursor, the port store contract with an
//! in-process implementation, capabilities, and runtime configuration.

/// Actor identity.
pub mod actor_ref;
/// Capability registry and per-actor handle tables.
pub mod capability;
/// Runtime configuration loaded from XDG locations.
pub mod config;
/// Error types shared across the port store and capability layers.
pub mod error;
/// Bounded token queue with a tentative read cursor.
pub mod fifo;
/// Port naming and per-port counts.
pub mod port;
/// The port store contract and its in-process implementation.
pub mod port_store;
/// Tokens carried on ports.
pub mod token;

pub use serde_json::Value;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use serde_json::{json, Value};

    pub use crate::actor_ref::ActorRef;
    pub use crate::capability::{
        Capabilities, Capability, CapabilityFactory, CapabilityHandle, CapabilityRegistry,
    };
    pub use crate::config::{EmberConfig, CONFIG};
    pub use crate::error::{CapabilityError, ConfigError, PortError};
    pub use crate::fifo::{Capacity, Fifo};
    pub use crate::port::{PortCount, PortDirection};
    pub use crate::port_store::{ActorPorts, LocalPortStore, PortStore};
    pub use crate::token::{ExceptionToken, Token};
}

static_assertions::assert_impl_all!(token::Token: Send, Sync, Clone);
static_assertions::assert_impl_all!(actor_ref::ActorRef: Send, Sync, Clone);
static_assertions::assert_impl_all!(capability::CapabilityRegistry: Send, Sync, Clone);
static_assertions::assert_impl_all!(port_store::LocalPortStore: Send, Sync);
