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
use ember_core::error::{CapabilityError, PortError};
use thiserror::Error;

/// Fatal errors raised while firing an actor.
///
/// None of these are retried by the engine. Whenever one is returned, every
/// input port the failing action had peeked has been restored.
#[derive(Debug, Error)]
pub enum FiringError {
    /// An action body produced a different number of values than it declares.
    #[error("action '{action}' of {actor} produced {produced} value(s), {expected} declared")]
    InvalidProduction {
        /// The firing actor.
        actor: ActorRef,
        /// Name of the offending action.
        action: &'static str,
        /// Declared output arity.
        expected: usize,
        /// Number of values actually produced.
        produced: usize,
    },
    /// An action body returned an error.
    #[error("action '{action}' of {actor} failed")]
    ActionFailed {
        /// The firing actor.
        actor: ActorRef,
        /// Name of the failing action.
        action: &'static str,
        /// Error returned by the body.
        #[source]
        source: anyhow::Error,
    },
    /// An exception token reached an action and the actor did not handle it.
    #[error("action '{action}' of {actor} received an unhandled exception token: {reason}")]
    UnhandledException {
        /// The firing actor.
        actor: ActorRef,
        /// Action that peeked the exception token.
        action: &'static str,
        /// Reason carried by the token.
        reason: String,
        /// Error returned by the exception handler.
        #[source]
        source: anyhow::Error,
    },
    /// The port store rejected an operation.
    #[error(transparent)]
    Port(#[from] PortError),
}

/// Errors raised while capturing or restoring managed state.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A managed field holds a value the portable format cannot represent.
    #[error("managed field '{field}' cannot be represented as a portable value")]
    NotRepresentable {
        /// Field name.
        field: String,
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },
    /// A managed field is absent from the state being restored.
    #[error("{ty}: managed field '{field}' is missing")]
    MissingField {
        /// Type being restored.
        ty: &'static str,
        /// Field name.
        field: String,
    },
    /// The state being restored carries a field the type does not manage.
    #[error("{ty}: unexpected field '{field}'")]
    UnexpectedField {
        /// Type being restored.
        ty: &'static str,
        /// Field name.
        field: String,
    },
    /// Managed state must be a key-ordered map.
    #[error("{ty}: managed state is not an object")]
    NotAnObject {
        /// Type being restored.
        ty: &'static str,
    },
    /// A stored value does not decode into the field's type.
    #[error("managed field '{field}' could not be decoded")]
    Decode {
        /// Field name.
        field: String,
        /// Underlying deserialisation error.
        #[source]
        source: serde_json::Error,
    },
    /// A snapshot was taken from a different actor type.
    #[error("snapshot of actor type '{found}' cannot restore '{expected}'")]
    TypeMismatch {
        /// Type of the restoring actor.
        expected: &'static str,
        /// Type recorded in the snapshot.
        found: String,
    },
}

/// Errors raised while constructing an actor or running a lifecycle hook.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A required capability is missing or could not be used.
    #[error(transparent)]
    Capability(#[from] CapabilityError),
    /// The initial configuration does not decode into the actor's config type.
    #[error("invalid configuration for {actor}")]
    Config {
        /// The actor being initialised.
        actor: ActorRef,
        /// Underlying deserialisation error.
        #[source]
        source: serde_json::Error,
    },
    /// A lifecycle hook returned an error.
    #[error("{hook} hook of {actor} failed")]
    Hook {
        /// The actor running the hook.
        actor: ActorRef,
        /// Hook name.
        hook: &'static str,
        /// Error returned by the hook.
        #[source]
        source: anyhow::Error,
    },
    /// Managed state could not be restored.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
