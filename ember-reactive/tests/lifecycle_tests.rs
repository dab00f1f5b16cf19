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

use ember_reactive::prelude::*;
use ember_test::prelude::*;

use crate::setup::actors::faulty::Faulty;
use crate::setup::actors::fetcher::{Fetcher, Leaky};
use crate::setup::{deliver_all, queued_values, store_for};

mod setup;

fn http_registry() -> (CapabilityRegistry, Script) {
    let registry = CapabilityRegistry::new();
    let script = Script::new();
    script.register(&registry, Fetcher::CAPABILITY).unwrap();
    (registry, script)
}

fn fetcher(registry: &CapabilityRegistry) -> ManagedActor<Active, Fetcher> {
    ManagedActor::<Idle, Fetcher>::new(ActorRef::new("fetcher"), registry)
        .unwrap()
        .init_with(json!({ "timeout_ms": 250 }))
        .unwrap()
}

/// A required capability that is not registered fails construction.
#[ember_test]
fn missing_capability_fails_construction() {
    let err = ManagedActor::<Idle, Fetcher>::new(ActorRef::new("fetcher"), &CapabilityRegistry::new())
        .unwrap_err();
    assert!(matches!(err, CapabilityError::NotFound(ref name) if name == "net.http"));
}

/// `init` opens the capability with the actor's configuration.
#[ember_test]
fn init_opens_capability_with_config() {
    let (registry, script) = http_registry();
    let actor = fetcher(&registry);

    assert_eq!(script.configs(), vec![json!({ "timeout_ms": 250 })]);
    assert_eq!(actor.context().open_handles().len(), 1);
    assert_eq!(actor.model.timeout_ms, 250);
}

/// A configuration that does not decode is rejected before `init` runs.
#[ember_test]
fn invalid_config_is_rejected() {
    let (registry, script) = http_registry();
    let err = ManagedActor::<Idle, Fetcher>::new(ActorRef::new("fetcher"), &registry)
        .unwrap()
        .init_with(json!({ "timeout_ms": "soon" }))
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Config { .. }));
    assert_eq!(script.opened(), 0);
}

/// Guards poll the capability; the buffered response is emitted by the
/// highest-priority action once it is complete.
#[ember_test]
fn capability_readiness_drives_firing() -> anyhow::Result<()> {
    let (registry, script) = http_registry();
    let mut actor = fetcher(&registry);
    let id = actor.actor_ref().clone();
    let mut ports = store_for(&id, &["url"], &["data"]);
    deliver_all(&mut ports, &id, "url", ["http://sensor.local/t"]);

    // Not writable yet: the URL stays queued.
    assert!(!actor.fire(&mut ports)?);
    assert_eq!(ports.queued(&id, "url", PortDirection::In)?.len(), 1);

    script.set_writable(true);
    let report = actor.fire_with_report(&mut ports)?;
    assert_eq!(report.actions(), vec!["request"]);
    assert_eq!(script.written(), vec![json!("http://sensor.local/t")]);

    script.push_read(json!({ "celsius": 21.5 }));
    let report = actor.fire_with_report(&mut ports)?;
    assert_eq!(report.actions(), vec!["receive", "emit"]);
    assert_eq!(
        queued_values(&ports, &id, "data", PortDirection::Out),
        vec![json!({ "celsius": 21.5 })]
    );
    assert!(!actor.fire(&mut ports)?);
    Ok(())
}

/// Handles are closed before relocation and re-acquired after restore; the
/// buffered response survives the move.
#[ember_test]
fn migration_reacquires_capabilities() -> anyhow::Result<()> {
    let (registry, script) = http_registry();
    let mut actor = fetcher(&registry);
    let id = actor.actor_ref().clone();
    let mut ports = LocalPortStore::new();
    ports.add_inport(&id, "url", None)?;
    ports.add_outport(&id, "data", Some(Capacity::Bounded(1)))?;

    // The first response fills `data`; the second stays buffered.
    script.push_read("first");
    script.push_read("second");
    assert!(actor.fire(&mut ports)?);
    assert_eq!(actor.model.response, Some(json!("second")));
    assert_eq!(script.pending_reads(), 0);

    actor.will_migrate()?;
    assert_eq!(script.closed(), 1);
    assert!(actor.context().open_handles().is_empty());

    let snapshot = actor.snapshot()?;
    assert_eq!(snapshot.managed["response"], json!("second"));
    assert!(snapshot.managed.get("handle").is_none());
    actor.end()?;

    let mut moved = ManagedActor::<Idle, Fetcher>::new(id.clone(), &registry)?.restore(snapshot)?;
    assert_eq!(script.opened(), 2);
    assert_eq!(moved.model.timeout_ms, 250);
    assert!(moved.model.handle.is_some());

    let mut target = store_for(&id, &["url"], &["data"]);
    assert!(moved.fire(&mut target)?);
    assert_eq!(
        queued_values(&target, &id, "data", PortDirection::Out),
        vec![json!("second")]
    );
    moved.end()?;
    assert_eq!(script.closed(), 2);
    Ok(())
}

/// Handles left open by a hook are closed on `end`.
#[ember_test]
fn leaked_capabilities_are_closed_on_end() -> anyhow::Result<()> {
    let registry = CapabilityRegistry::new();
    let script = Script::new();
    script.register(&registry, Leaky::CAPABILITY)?;

    let actor = ManagedActor::<Idle, Leaky>::new(ActorRef::new("leaky"), &registry)?.init(())?;
    assert_eq!(script.opened(), 1);
    actor.end()?;
    assert_eq!(script.closed(), 1);
    Ok(())
}

/// `init` runs with typed configuration for actors that declare one.
#[ember_test]
fn typed_configuration_reaches_init() -> anyhow::Result<()> {
    let mut actor = ManagedActor::<Idle, Faulty>::new(ActorRef::new("faulty"), &CapabilityRegistry::new())?
        .init_with(json!("wrong_arity"))?;
    let id = actor.actor_ref().clone();
    let mut ports = store_for(&id, &["x"], &["y"]);
    deliver_all(&mut ports, &id, "x", [1, 2]);
    assert!(matches!(
        actor.fire(&mut ports),
        Err(FiringError::InvalidProduction { .. })
    ));
    Ok(())
}
