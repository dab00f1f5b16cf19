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

use std::fmt;

use ember_core::port::{aggregate, PortCount};
use serde_json::Value;

use crate::actor::ActorContext;

/// Structural guard, checked before any port is touched.
pub type Guard<A> = fn(&A, &ActorContext) -> bool;

/// Guard over the values an action is about to consume.
pub type InputGuard<A> = fn(&A, &ActorContext, &[Value]) -> bool;

/// Transformation from consumed values to produced values.
///
/// Receives the consumed values flattened in declared input order.
pub type Body<A> = fn(&mut A, &mut ActorContext, Vec<Value>) -> anyhow::Result<ActionResult>;

/// What an action body reports back to the selector.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// Values to enqueue, flattened in declared output order.
    Produced(Vec<Value>),
    /// `true`: fired with nothing to produce. `false`: declined after seeing
    /// its inputs; the peek is cancelled and the action counts as not eligible.
    Fired(bool),
}

impl ActionResult {
    /// A production of a single value.
    pub fn one(value: impl Into<Value>) -> Self {
        Self::Produced(vec![value.into()])
    }

    /// A production of several values.
    pub fn produced<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Produced(values.into_iter().map(Into::into).collect())
    }

    /// Fired without producing anything.
    pub const fn fired() -> Self {
        Self::Fired(true)
    }

    /// Declined to fire.
    pub const fn declined() -> Self {
        Self::Fired(false)
    }
}

/// A guarded, atomic port-to-port transformation.
///
/// Built once per actor type and never changed afterwards:
///
/// ```ignore
/// Action::new("double", |_, _, inputs| Ok(ActionResult::one(inputs[0].as_i64().unwrap_or(0) * 2)))
///     .input("in")
///     .output("out")
/// ```
pub struct Action<A> {
    pub(crate) name: &'static str,
    pub(crate) guard: Option<Guard<A>>,
    pub(crate) input_guard: Option<InputGuard<A>>,
    pub(crate) inputs: Vec<PortCount>,
    pub(crate) outputs: Vec<PortCount>,
    pub(crate) body: Body<A>,
}

impl<A> Action<A> {
    /// Creates an action with no ports and an always-true guard.
    pub fn new(name: &'static str, body: Body<A>) -> Self {
        Self {
            name,
            guard: None,
            input_guard: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            body,
        }
    }

    /// Sets the structural guard.
    #[must_use]
    pub fn guard(mut self, guard: Guard<A>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Sets a guard over the peeked input values.
    #[must_use]
    pub fn when_inputs(mut self, guard: InputGuard<A>) -> Self {
        self.input_guard = Some(guard);
        self
    }

    /// Consumes one token from `port` per firing.
    #[must_use]
    pub fn input(self, port: &'static str) -> Self {
        self.input_n(port, 1)
    }

    /// Consumes `count` tokens from `port` per firing.
    #[must_use]
    pub fn input_n(mut self, port: &'static str, count: usize) -> Self {
        self.inputs.push(PortCount::new(port, count));
        self
    }

    /// Produces one token on `port` per firing.
    #[must_use]
    pub fn output(self, port: &'static str) -> Self {
        self.output_n(port, 1)
    }

    /// Produces `count` tokens on `port` per firing.
    #[must_use]
    pub fn output_n(mut self, port: &'static str, count: usize) -> Self {
        self.outputs.push(PortCount::new(port, count));
        self
    }

    /// Action name, used in logs and errors.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared inputs, in order.
    pub fn consumes(&self) -> &[PortCount] {
        &self.inputs
    }

    /// Declared outputs, in order.
    pub fn produces(&self) -> &[PortCount] {
        &self.outputs
    }

    /// Total number of values the body must produce.
    pub fn output_arity(&self) -> usize {
        self.outputs.iter().map(|output| output.count).sum()
    }

    pub(crate) fn input_demand(&self) -> Vec<PortCount> {
        aggregate(&self.inputs)
    }

    pub(crate) fn output_demand(&self) -> Vec<PortCount> {
        aggregate(&self.outputs)
    }

    /// Distinct input port names, in first-declared order.
    pub(crate) fn input_ports(&self) -> Vec<&'static str> {
        self.input_demand().into_iter().map(|demand| demand.port).collect()
    }
}

impl<A> Clone for Action<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            guard: self.guard,
            input_guard: self.input_guard,
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            body: self.body,
        }
    }
}

impl<A> fmt::Debug for Action<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("guarded", &self.guard.is_some())
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .finish_non_exhaustive()
    }
}
