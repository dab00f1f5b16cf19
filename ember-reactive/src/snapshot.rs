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

//! Managed-state snapshots.
//!
//! [`ActorSnapshot`] is the portable payload handed to the relocation layer.
//! The free functions are the building blocks used by
//! `#[derive(ManagedState)]`; they are public so hand-written implementations
//! can follow the same rules.

use ember_core::actor_ref::ActorRef;
use ember_core::config::CONFIG;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use serde_json::Map;
use serde_json::Value;

use crate::common::SnapshotError;
use crate::traits::ManagedState;

mod finite;

/// Managed state of one actor, tagged with its type and identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// `Actor::TYPE_NAME` of the captured actor.
    pub actor_type: String,
    /// Identity of the captured actor.
    pub actor: ActorRef,
    /// The managed fields.
    pub managed: Value,
}

/// Encodes a plain managed field.
///
/// Fails with [`SnapshotError::NotRepresentable`] if the value cannot be
/// serialised or holds a NaN or infinite float.
pub fn encode_field<T: Serialize + ?Sized>(field: &str, value: &T) -> Result<Value, SnapshotError> {
    finite::check(value)
        .and_then(|()| serde_json::to_value(value))
        .map_err(|source| SnapshotError::NotRepresentable {
        field: field.to_string(),
        source,
    })
}

/// Encodes a nested managed field through its own contract.
pub fn encode_nested<T: ManagedState>(value: &T) -> Result<Value, SnapshotError> {
    value.state()
}

/// Opens captured state as a map.
pub fn into_object(ty: &'static str, state: Value) -> Result<Map<String, Value>, SnapshotError> {
    match state {
        Value::Object(map) => Ok(map),
        _ => Err(SnapshotError::NotAnObject { ty }),
    }
}

/// Removes a managed field from captured state.
pub fn take_field(ty: &'static str, state: &mut Map<String, Value>, field: &str) -> Result<Value, SnapshotError> {
    state.remove(field).ok_or_else(|| SnapshotError::MissingField {
        ty,
        field: field.to_string(),
    })
}

/// Decodes a plain managed field.
pub fn decode_field<T: DeserializeOwned>(field: &str, value: Value) -> Result<T, SnapshotError> {
    serde_json::from_value(value).map_err(|source| SnapshotError::Decode {
        field: field.to_string(),
        source,
    })
}

/// Decodes a nested managed field into a fresh value.
pub fn decode_nested<T: ManagedState + Default>(value: Value) -> Result<T, SnapshotError> {
    T::from_state(value)
}

/// Checks what is left of captured state after every managed field was taken.
///
/// Leftover fields are rejected or logged according to
/// `snapshot.reject_unknown_fields`.
pub fn finish(ty: &'static str, rest: Map<String, Value>) -> Result<(), SnapshotError> {
    finish_with(ty, rest, CONFIG.snapshot.reject_unknown_fields)
}

fn finish_with(ty: &'static str, rest: Map<String, Value>, reject_unknown: bool) -> Result<(), SnapshotError> {
    match rest.into_iter().next() {
        None => Ok(()),
        Some((field, _)) if reject_unknown => Err(SnapshotError::UnexpectedField { ty, field }),
        Some((field, _)) => {
            warn!(ty, field = %field, "Ignoring unmanaged field in restored state");
            Ok(())
        }
    }
}
