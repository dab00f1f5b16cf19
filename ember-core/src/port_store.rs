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

//! The port interface the firing engine consumes.
//!
//! Port queues belong to the node runtime. The engine only reaches them through
//! [`PortStore`], addressing each queue by actor reference and port name. The
//! transactional read protocol is expressed by three calls: [`PortStore::peek`]
//! reads without consuming, [`PortStore::peek_commit`] consumes everything
//! peeked, and [`PortStore::peek_cancel`] forgets the peek.
//!
//! [`LocalPortStore`] is an in-process implementation backed by [`Fifo`] queues.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::actor_ref::ActorRef;
use crate::error::PortError;
use crate::fifo::{Capacity, Fifo};
use crate::port::PortDirection;
use crate::token::Token;

/// Access to an actor's port queues.
///
/// Every method must be non-blocking and bounded in time. Implementations must
/// make a commit followed by the writes of one firing appear atomic to
/// observers outside the engine; taking `&mut self` for the whole firing is
/// enough for single-threaded stores.
pub trait PortStore {
    /// Returns `true` if the in-port holds at least `count` tokens past its
    /// tentative cursor.
    fn tokens_available(&self, actor: &ActorRef, port: &str, count: usize) -> Result<bool, PortError>;

    /// Returns `true` if the out-port can accept at least `count` tokens.
    ///
    /// A `true` answer is a promise: the next `count` calls to
    /// [`write`](Self::write) on that port must succeed, even after a
    /// [`peek_commit`](Self::peek_commit) on the same actor's in-ports.
    fn slots_available(&self, actor: &ActorRef, port: &str, count: usize) -> Result<bool, PortError>;

    /// Returns the next `count` tokens of the in-port without consuming them.
    fn peek(&mut self, actor: &ActorRef, port: &str, count: usize) -> Result<Vec<Token>, PortError>;

    /// Consumes every peeked token on the given in-ports.
    ///
    /// Returns the ports left empty by the commit.
    fn peek_commit(&mut self, actor: &ActorRef, ports: &[&str]) -> Result<BTreeSet<String>, PortError>;

    /// Forgets every peek on the given in-ports; the tokens stay queued.
    fn peek_cancel(&mut self, actor: &ActorRef, ports: &[&str]) -> Result<(), PortError>;

    /// Appends a token to the out-port.
    ///
    /// Runs after the firing's inputs are committed, so it must not fail for
    /// a port whose free slots were just confirmed by
    /// [`slots_available`](Self::slots_available). An error here leaves the
    /// inputs consumed and the outputs partly written.
    fn write(&mut self, actor: &ActorRef, port: &str, token: Token) -> Result<(), PortError>;
}

/// The in- and out-port queues of one actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorPorts {
    inports: BTreeMap<String, Fifo>,
    outports: BTreeMap<String, Fifo>,
}

impl ActorPorts {
    fn side(&self, direction: PortDirection) -> &BTreeMap<String, Fifo> {
        match direction {
            PortDirection::In => &self.inports,
            PortDirection::Out => &self.outports,
        }
    }

    fn side_mut(&mut self, direction: PortDirection) -> &mut BTreeMap<String, Fifo> {
        match direction {
            PortDirection::In => &mut self.inports,
            PortDirection::Out => &mut self.outports,
        }
    }

    /// Returns the queue of a port, if it exists.
    pub fn fifo(&self, port: &str, direction: PortDirection) -> Option<&Fifo> {
        self.side(direction).get(port)
    }

    /// Names of the ports in one direction, sorted.
    pub fn port_names(&self, direction: PortDirection) -> impl Iterator<Item = &str> {
        self.side(direction).keys().map(String::as_str)
    }
}

/// In-process [`PortStore`] holding every actor's queues in memory.
#[derive(Debug, Default)]
pub struct LocalPortStore {
    actors: HashMap<ActorRef, ActorPorts>,
}

impl LocalPortStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an in-port; `None` uses the configured default capacity.
    pub fn add_inport(
        &mut self,
        actor: &ActorRef,
        port: &str,
        capacity: Option<Capacity>,
    ) -> Result<(), PortError> {
        self.add_port(actor, port, PortDirection::In, capacity)
    }

    /// Adds an out-port; `None` uses the configured default capacity.
    pub fn add_outport(
        &mut self,
        actor: &ActorRef,
        port: &str,
        capacity: Option<Capacity>,
    ) -> Result<(), PortError> {
        self.add_port(actor, port, PortDirection::Out, capacity)
    }

    fn add_port(
        &mut self,
        actor: &ActorRef,
        port: &str,
        direction: PortDirection,
        capacity: Option<Capacity>,
    ) -> Result<(), PortError> {
        let side = self.actors.entry(actor.clone()).or_default().side_mut(direction);
        if side.contains_key(port) {
            return Err(PortError::DuplicatePort {
                actor: actor.clone(),
                port: port.to_string(),
                direction,
            });
        }
        let capacity = capacity.unwrap_or_default();
        debug!(%actor, port, %direction, ?capacity, "Adding port");
        side.insert(port.to_string(), Fifo::new(capacity));
        Ok(())
    }

    /// Enqueues a token on an in-port, as a connected peer would.
    pub fn deliver(&mut self, actor: &ActorRef, port: &str, token: Token) -> Result<(), PortError> {
        let fifo = self.fifo_mut(actor, port, PortDirection::In)?;
        fifo.write(token).map_err(|_| PortError::QueueFull {
            actor: actor.clone(),
            port: port.to_string(),
        })
    }

    /// Takes every token queued on an out-port.
    pub fn drain(&mut self, actor: &ActorRef, port: &str) -> Result<Vec<Token>, PortError> {
        Ok(self.fifo_mut(actor, port, PortDirection::Out)?.drain())
    }

    /// Moves as many tokens as fit from one actor's out-port to another
    /// actor's in-port, preserving order. Returns the number moved.
    pub fn transmit(
        &mut self,
        from: (&ActorRef, &str),
        to: (&ActorRef, &str),
    ) -> Result<usize, PortError> {
        // Validate the destination before taking anything off the source.
        self.fifo(to.0, to.1, PortDirection::In)?;
        let mut moved = 0;
        loop {
            let has_room = self.fifo(to.0, to.1, PortDirection::In)?.slots_available(1);
            let source = self.fifo_mut(from.0, from.1, PortDirection::Out)?;
            if !has_room || !source.tokens_available(1) {
                break;
            }
            let mut taken = source.peek(1).unwrap_or_default();
            source.commit();
            if let Some(token) = taken.pop() {
                self.deliver(to.0, to.1, token)?;
                moved += 1;
            }
        }
        trace!(from_actor = %from.0, from_port = from.1, to_actor = %to.0, to_port = to.1, moved, "Transmitted tokens");
        Ok(moved)
    }

    /// Returns a copy of the tokens queued on a port.
    pub fn queued(
        &self,
        actor: &ActorRef,
        port: &str,
        direction: PortDirection,
    ) -> Result<Vec<Token>, PortError> {
        Ok(self.fifo(actor, port, direction)?.iter().cloned().collect())
    }

    /// Removes an actor's ports from the store, e.g. before relocating it.
    pub fn detach(&mut self, actor: &ActorRef) -> Option<ActorPorts> {
        self.actors.remove(actor)
    }

    /// Installs a previously detached port set for an actor.
    ///
    /// Any pending peek in the installed queues is dropped.
    pub fn attach(&mut self, actor: ActorRef, mut ports: ActorPorts) {
        for fifo in ports.inports.values_mut().chain(ports.outports.values_mut()) {
            fifo.cancel();
        }
        self.actors.insert(actor, ports);
    }

    /// Returns the ports of an actor, if any are registered.
    pub fn ports(&self, actor: &ActorRef) -> Option<&ActorPorts> {
        self.actors.get(actor)
    }

    fn fifo(&self, actor: &ActorRef, port: &str, direction: PortDirection) -> Result<&Fifo, PortError> {
        self.actors
            .get(actor)
            .ok_or_else(|| PortError::UnknownActor(actor.clone()))?
            .side(direction)
            .get(port)
            .ok_or_else(|| PortError::UnknownPort {
                actor: actor.clone(),
                port: port.to_string(),
                direction,
            })
    }

    fn fifo_mut(
        &mut self,
        actor: &ActorRef,
        port: &str,
        direction: PortDirection,
    ) -> Result<&mut Fifo, PortError> {
        self.actors
            .get_mut(actor)
            .ok_or_else(|| PortError::UnknownActor(actor.clone()))?
            .side_mut(direction)
            .get_mut(port)
            .ok_or_else(|| PortError::UnknownPort {
                actor: actor.clone(),
                port: port.to_string(),
                direction,
            })
    }
}

impl PortStore for LocalPortStore {
    fn tokens_available(&self, actor: &ActorRef, port: &str, count: usize) -> Result<bool, PortError> {
        Ok(self.fifo(actor, port, PortDirection::In)?.tokens_available(count))
    }

    fn slots_available(&self, actor: &ActorRef, port: &str, count: usize) -> Result<bool, PortError> {
        Ok(self.fifo(actor, port, PortDirection::Out)?.slots_available(count))
    }

    fn peek(&mut self, actor: &ActorRef, port: &str, count: usize) -> Result<Vec<Token>, PortError> {
        let fifo = self.fifo_mut(actor, port, PortDirection::In)?;
        let available = fifo.len() - fifo.pending();
        fifo.peek(count).ok_or_else(|| PortError::InsufficientTokens {
            actor: actor.clone(),
            port: port.to_string(),
            requested: count,
            available,
        })
    }

    fn peek_commit(&mut self, actor: &ActorRef, ports: &[&str]) -> Result<BTreeSet<String>, PortError> {
        // Resolve every port first so an unknown name cannot leave a partial commit.
        for port in ports {
            self.fifo(actor, port, PortDirection::In)?;
        }
        let mut exhausted = BTreeSet::new();
        for port in ports {
            let fifo = self.fifo_mut(actor, port, PortDirection::In)?;
            fifo.commit();
            if fifo.is_empty() {
                exhausted.insert((*port).to_string());
            }
        }
        Ok(exhausted)
    }

    fn peek_cancel(&mut self, actor: &ActorRef, ports: &[&str]) -> Result<(), PortError> {
        let mut first_error = None;
        for port in ports {
            match self.fifo_mut(actor, port, PortDirection::In) {
                Ok(fifo) => fifo.cancel(),
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn write(&mut self, actor: &ActorRef, port: &str, token: Token) -> Result<(), PortError> {
        let fifo = self.fifo_mut(actor, port, PortDirection::Out)?;
        fifo.write(token).map_err(|_| PortError::QueueFull {
            actor: actor.clone(),
            port: port.to_string(),
        })
    }
}
