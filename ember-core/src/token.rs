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

//! Tokens carried by port queues.
//!
//! A token is an immutable, serialisable value. Ordinary tokens wrap a portable
//! [`Value`]; exception tokens mark an upstream failure and are never handed to
//! an action body directly.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker carried by a token that reports an error instead of data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct ExceptionToken {
    /// Human readable description of the upstream failure.
    #[new(into)]
    pub reason: String,
}

impl fmt::Display for ExceptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exception token: {}", self.reason)
    }
}

/// A single entry in a port queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// An ordinary data token.
    Data(Value),
    /// An exception marker.
    Exception(ExceptionToken),
}

impl Token {
    /// Creates a data token from anything convertible into a [`Value`].
    pub fn data(value: impl Into<Value>) -> Self {
        Self::Data(value.into())
    }

    /// Creates an exception token with the given reason.
    pub fn exception(reason: impl Into<String>) -> Self {
        Self::Exception(ExceptionToken::new(reason))
    }

    /// Returns `true` if this token carries an exception marker.
    #[inline]
    pub const fn is_exception(&self) -> bool {
        matches!(self, Self::Exception(_))
    }

    /// Returns the carried value, or `None` for exception tokens.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Data(value) => Some(value),
            Self::Exception(_) => None,
        }
    }

    /// Consumes the token and returns its value, or the exception marker.
    pub fn into_value(self) -> Result<Value, ExceptionToken> {
        match self {
            Self::Data(value) => Ok(value),
            Self::Exception(exception) => Err(exception),
        }
    }
}

impl From<Value> for Token {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}
