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

use serde_json::Value;

use crate::common::SnapshotError;

/// The relocation contract: capture and restore an explicit set of fields.
///
/// Usually derived with `#[derive(ManagedState)]`, marking participating
/// fields `#[managed]` (portable values) or `#[managed(nested)]` (values that
/// implement this trait themselves).
pub trait ManagedState {
    /// Names of the managed fields, in declaration order.
    fn managed_fields() -> &'static [&'static str];

    /// Captures the managed fields as a key-ordered map.
    fn state(&self) -> Result<Value, SnapshotError>;

    /// Overwrites the managed fields from a captured map. Unmanaged fields
    /// keep their current values. On error nothing is changed.
    fn set_state(&mut self, state: Value) -> Result<(), SnapshotError>;

    /// Builds a default value and restores the managed fields into it.
    fn from_state(state: Value) -> Result<Self, SnapshotError>
    where
        Self: Sized + Default,
    {
        let mut value = Self::default();
        value.set_state(state)?;
        Ok(value)
    }
}
