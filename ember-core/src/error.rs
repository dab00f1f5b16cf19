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

//! Error types raised by the collaborators in this crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::actor_ref::ActorRef;
use crate::port::PortDirection;

/// Errors raised by a [`PortStore`](crate::PortStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortError {
    /// The actor has no port with this name and direction.
    #[error("actor '{actor}' has no {direction}-port named '{port}'")]
    UnknownPort {
        /// Actor owning the port.
        actor: ActorRef,
        /// Requested port name.
        port: String,
        /// Requested direction.
        direction: PortDirection,
    },
    /// The store knows nothing about this actor.
    #[error("no ports registered for actor '{0}'")]
    UnknownActor(ActorRef),
    /// A peek asked for more tokens than are available.
    #[error("port '{port}' of actor '{actor}' holds {available} readable tokens, {requested} requested")]
    InsufficientTokens {
        /// Actor owning the port.
        actor: ActorRef,
        /// Port name.
        port: String,
        /// Number of tokens asked for.
        requested: usize,
        /// Number of tokens past the tentative cursor.
        available: usize,
    },
    /// A write found the queue full.
    #[error("port '{port}' of actor '{actor}' is full")]
    QueueFull {
        /// Actor owning the port.
        actor: ActorRef,
        /// Port name.
        port: String,
    },
    /// A port with this name and direction already exists.
    #[error("actor '{actor}' already has a {direction}-port named '{port}'")]
    DuplicatePort {
        /// Actor owning the port.
        actor: ActorRef,
        /// Port name.
        port: String,
        /// Direction of the existing port.
        direction: PortDirection,
    },
}

/// Errors raised while registering, opening or using capabilities.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// No factory is registered under this name.
    #[error("capability '{0}' is not registered")]
    NotFound(String),
    /// A factory is already registered under this name.
    #[error("capability '{0}' is already registered")]
    AlreadyRegistered(String),
    /// The handle does not refer to an open capability object.
    #[error("no open capability for handle {0}")]
    UnknownHandle(String),
    /// The factory refused to open the capability.
    #[error("failed to open capability '{name}'")]
    OpenFailed {
        /// Capability name.
        name: String,
        /// Failure reported by the factory.
        #[source]
        source: anyhow::Error,
    },
    /// The capability does not support reading.
    #[error("capability '{0}' cannot be read")]
    NotReadable(String),
    /// The capability does not support writing.
    #[error("capability '{0}' cannot be written")]
    NotWritable(String),
    /// The capability failed while reading or writing.
    #[error("capability '{name}' failed")]
    Io {
        /// Capability name.
        name: String,
        /// Underlying failure.
        #[source]
        source: anyhow::Error,
    },
}

/// Errors raised while loading configuration from an explicit path.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration file {}", .path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("failed to parse configuration file {}", .path.display())]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}
