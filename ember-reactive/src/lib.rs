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
#![forbid(missing_docs)]

//! # Ember Reactive
//!
//! The dataflow firing engine. An actor owns a fixed, priority-ordered list of
//! guarded actions; firing the actor repeatedly selects the highest-priority
//! action whose guard holds and whose input tokens and output slots are
//! available, runs it, and commits its effect on the port queues atomically.
//!
//! ## Key Concepts
//!
//! - **Actions (`Action`)**: A structural guard, per-port input and output
//!   counts, an optional guard over the peeked inputs, and a body.
//! - **Selection**: Peek, invoke, validate, then commit or cancel. A body that
//!   fails or produces the wrong number of values leaves every input queued.
//! - **Firing loop**: Scans from the top after every firing, until a full scan
//!   fires nothing.
//! - **Managed state**: Fields declared with `#[managed]` are captured into an
//!   `ActorSnapshot` and restored on another host.
//! - **Lifecycle**: Type-state (`Idle`, `Active`) around `init`, `restore`,
//!   `will_migrate`, `did_migrate` and `end`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ember_reactive::prelude::*;
//!
//! #[ember_actor]
//! struct Doubler {
//!     #[managed]
//!     fired: u64,
//! }
//!
//! impl Actor for Doubler {
//!     const TYPE_NAME: &'static str = "Doubler";
//!     type Config = ();
//!
//!     fn action_priority() -> Vec<Action<Self>> {
//!         vec![Action::new("double", Self::double).input("in").output("out")]
//!     }
//! }
//! ```

extern crate self as ember_reactive;

/// Action descriptors, selection and firing reports.
pub(crate) mod action;
/// Managed actors and their runtime context.
pub(crate) mod actor;
/// Errors and tracing setup.
pub(crate) mod common;
/// Managed-state snapshots.
pub mod snapshot;
/// Traits implemented by actor types.
pub mod traits;

pub use common::logging;
pub use common::{FiringError, LifecycleError, SnapshotError};
pub use ember_macro::{ember_actor, ManagedState};
pub use serde_json::Value;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use ember_core::prelude::*;
    pub use ember_macro::{ember_actor, ManagedState};

    pub use crate::action::{Action, ActionResult, Body, FireReport, Firing, Guard, InputGuard};
    pub use crate::actor::{Active, ActorContext, Idle, ManagedActor};
    pub use crate::common::logging::init_tracing;
    pub use crate::common::{FiringError, LifecycleError, SnapshotError};
    pub use crate::snapshot::ActorSnapshot;
    pub use crate::traits::{Actor, ManagedState};
}

static_assertions::assert_impl_all!(snapshot::ActorSnapshot: Send, Sync, Clone);
static_assertions::assert_impl_all!(FiringError: Send, Sync);
