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

//! Testing utilities for Ember actors.
//!
//! Provides the [`ember_test`] attribute, a tracing initializer tuned for test
//! output, and [`Script`], a capability whose readiness and data are driven by
//! the test.

use std::collections::VecDeque;
use std::panic;
use std::sync::{Arc, Once};

use ember_core::capability::{Capability, CapabilityRegistry};
use ember_core::error::CapabilityError;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub use ember_test_macro::ember_test;
pub use tracing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use ember_test_macro::ember_test;

    pub use crate::{initialize_tracing, Script, ScriptedCapability};
}

static TRACING: Once = Once::new();
static PANIC_HOOK: Once = Once::new();

/// Installs a global test subscriber writing through the test harness.
///
/// `RUST_LOG` takes precedence over the built-in filter. Safe to call from
/// every test.
pub fn initialize_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,ember_reactive=trace,ember_core=debug"));

        let subscriber = FmtSubscriber::builder()
            .compact()
            .with_line_number(true)
            .without_time()
            .with_target(true)
            .with_env_filter(filter)
            .with_test_writer()
            .finish();

        // Another subscriber may already be installed by the test binary.
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Chains a panic hook that logs the panic message and location via `tracing`.
pub fn install_panic_logging() {
    PANIC_HOOK.call_once(|| {
        let orig_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let message = panic_info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "No error message".to_string());
            let location = panic_info
                .location()
                .map_or_else(|| "unknown location".to_string(), |l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
            error!("Panic at {}: {}", location, message.trim().replace('\n', " "));
            orig_hook(panic_info);
        }));
    });
}

#[derive(Debug, Default)]
struct ScriptState {
    reads: VecDeque<Value>,
    written: Vec<Value>,
    writable: bool,
    configs: Vec<Value>,
    closed: usize,
}

/// Test-side control of a scripted capability.
///
/// Every object opened from the same script shares its read queue and write
/// log. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct Script {
    state: Arc<Mutex<ScriptState>>,
}

impl Script {
    /// Creates a script with nothing to read that refuses writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a value for the next `read`; the capability becomes readable.
    pub fn push_read(&self, value: impl Into<Value>) {
        self.state.lock().reads.push_back(value.into());
    }

    /// Controls what `can_write` reports.
    pub fn set_writable(&self, writable: bool) {
        self.state.lock().writable = writable;
    }

    /// Values written so far, oldest first.
    pub fn written(&self) -> Vec<Value> {
        self.state.lock().written.clone()
    }

    /// Values still waiting to be read.
    pub fn pending_reads(&self) -> usize {
        self.state.lock().reads.len()
    }

    /// Configuration passed to each `open`, in order.
    pub fn configs(&self) -> Vec<Value> {
        self.state.lock().configs.clone()
    }

    /// Number of objects opened from this script.
    pub fn opened(&self) -> usize {
        self.state.lock().configs.len()
    }

    /// Number of objects closed.
    pub fn closed(&self) -> usize {
        self.state.lock().closed
    }

    /// Registers this script under `name`.
    pub fn register(&self, registry: &CapabilityRegistry, name: &str) -> Result<(), CapabilityError> {
        let script = self.clone();
        registry.register(name, move |_, config| {
            script.state.lock().configs.push(config.clone());
            Ok(Box::new(ScriptedCapability {
                script: script.clone(),
            }) as Box<dyn Capability>)
        })
    }
}

/// A capability object opened from a [`Script`].
#[derive(Debug)]
pub struct ScriptedCapability {
    script: Script,
}

impl Capability for ScriptedCapability {
    fn can_read(&self) -> bool {
        !self.script.state.lock().reads.is_empty()
    }

    fn can_write(&self) -> bool {
        self.script.state.lock().writable
    }

    fn read(&mut self) -> anyhow::Result<Value> {
        self.script
            .state
            .lock()
            .reads
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("scripted capability has nothing to read"))
    }

    fn write(&mut self, value: Value) -> anyhow::Result<()> {
        self.script.state.lock().written.push(value);
        Ok(())
    }

    fn close(&mut self) {
        self.script.state.lock().closed += 1;
    }
}
