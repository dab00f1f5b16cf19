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

//! Bounded or unbounded token queue with a tentative read cursor.
//!
//! Reads happen in two phases. [`Fifo::peek`] hands out copies of tokens and
//! advances the tentative cursor without removing anything; [`Fifo::commit`]
//! then drops every token before the cursor, while [`Fifo::cancel`] moves the
//! cursor back so the same tokens are seen again. Writes always append after
//! the committed and tentatively read tokens.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// Queue capacity of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capacity {
    /// At most this many tokens may be queued.
    Bounded(usize),
    /// The queue grows without limit.
    Unbounded,
}

impl Capacity {
    /// Converts a configured size into a capacity, treating `0` as unbounded.
    #[must_use]
    pub const fn from_size(size: usize) -> Self {
        if size == 0 {
            Self::Unbounded
        } else {
            Self::Bounded(size)
        }
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::from_size(crate::config::CONFIG.ports.default_capacity)
    }
}

/// FIFO queue backing a single port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fifo {
    capacity: Capacity,
    tokens: VecDeque<Token>,
    /// Number of tokens handed out by `peek` since the last commit or cancel.
    #[serde(skip)]
    tentative: usize,
}

impl Fifo {
    /// Creates an empty queue with the given capacity.
    #[must_use]
    pub fn new(capacity: Capacity) -> Self {
        Self {
            capacity,
            tokens: VecDeque::new(),
            tentative: 0,
        }
    }

    /// Returns the capacity of this queue.
    #[inline]
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Number of queued tokens, including tentatively read ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no tokens are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens handed out by `peek` and not yet committed or cancelled.
    #[inline]
    pub const fn pending(&self) -> usize {
        self.tentative
    }

    /// Returns `true` if at least `count` tokens lie past the tentative cursor.
    pub fn tokens_available(&self, count: usize) -> bool {
        self.tokens.len() - self.tentative >= count
    }

    /// Returns `true` if at least `count` more tokens can be written.
    pub fn slots_available(&self, count: usize) -> bool {
        match self.capacity {
            Capacity::Bounded(size) => size.saturating_sub(self.tokens.len()) >= count,
            Capacity::Unbounded => true,
        }
    }

    /// Copies the next `count` tokens past the cursor and advances the cursor.
    ///
    /// Returns `None`, leaving the cursor untouched, if fewer than `count`
    /// tokens are available.
    pub fn peek(&mut self, count: usize) -> Option<Vec<Token>> {
        if !self.tokens_available(count) {
            return None;
        }
        let start = self.tentative;
        self.tentative += count;
        Some(self.tokens.range(start..start + count).cloned().collect())
    }

    /// Removes every tentatively read token and returns how many were removed.
    pub fn commit(&mut self) -> usize {
        let committed = self.tentative;
        self.tokens.drain(..committed);
        self.tentative = 0;
        committed
    }

    /// Moves the tentative cursor back to the first queued token.
    pub fn cancel(&mut self) {
        self.tentative = 0;
    }

    /// Appends a token, handing it back if the queue is full.
    pub fn write(&mut self, token: Token) -> Result<(), Token> {
        if !self.slots_available(1) {
            return Err(token);
        }
        self.tokens.push_back(token);
        Ok(())
    }

    /// Removes and returns every committed token past any pending peek.
    ///
    /// Used by the runtime to take produced tokens off an out-port.
    pub fn drain(&mut self) -> Vec<Token> {
        let start = self.tentative;
        self.tokens.drain(start..).collect()
    }

    /// Iterates over every queued token in order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }
}
