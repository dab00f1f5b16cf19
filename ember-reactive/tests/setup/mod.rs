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

#![allow(dead_code)]

use ember_reactive::prelude::*;

// Declare the submodules.
pub mod actors;

/// Queue capacity used by test ports, independent of the configured default.
pub const TEST_CAPACITY: usize = 16;

/// Creates a store holding the given ports for one actor.
pub fn store_for(actor: &ActorRef, inports: &[&str], outports: &[&str]) -> LocalPortStore {
    let mut store = LocalPortStore::new();
    for port in inports {
        store
            .add_inport(actor, port, Some(Capacity::Bounded(TEST_CAPACITY)))
            .unwrap();
    }
    for port in outports {
        store
            .add_outport(actor, port, Some(Capacity::Bounded(TEST_CAPACITY)))
            .unwrap();
    }
    store
}

/// Delivers each value as a data token on an in-port.
pub fn deliver_all<I, V>(store: &mut LocalPortStore, actor: &ActorRef, port: &str, values: I)
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    for value in values {
        store.deliver(actor, port, Token::data(value)).unwrap();
    }
}

/// Values of the data tokens queued on a port, oldest first.
pub fn queued_values(store: &LocalPortStore, actor: &ActorRef, port: &str, direction: PortDirection) -> Vec<Value> {
    store
        .queued(actor, port, direction)
        .unwrap()
        .into_iter()
        .filter_map(|token| token.into_value().ok())
        .collect()
}

/// Creates and initialises an actor without capabilities.
pub fn start<A: Actor<Config = ()>>(id: &str) -> ManagedActor<Active, A> {
    ManagedActor::<Idle, A>::new(ActorRef::new(id), &CapabilityRegistry::new())
        .unwrap()
        .init(())
        .unwrap()
}
