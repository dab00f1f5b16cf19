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

//! Transactional action selection.
//!
//! For each candidate action, in priority order: guard, availability of every
//! input token and output slot, peek, invoke, validate, then commit or cancel.
//! Nothing is visible on the ports unless the whole sequence succeeds.

use std::fmt;

use ember_core::actor_ref::ActorRef;
use ember_core::port_store::PortStore;
use ember_core::token::{ExceptionToken, Token};
use serde_json::Value;
use tracing::{error, trace};

use crate::action::{Action, ActionResult, Firing};
use crate::actor::ActorContext;
use crate::common::FiringError;
use crate::traits::Actor;

/// Why a candidate action did not fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Skip {
    Guard,
    Tokens(&'static str),
    Slots(&'static str),
    InputGuard,
    Declined,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guard => f.write_str("guard is false"),
            Self::Tokens(port) => write!(f, "not enough tokens on '{port}'"),
            Self::Slots(port) => write!(f, "not enough free slots on '{port}'"),
            Self::InputGuard => f.write_str("input guard rejected the peeked values"),
            Self::Declined => f.write_str("body declined"),
        }
    }
}

#[derive(Debug)]
pub(crate) enum Attempt {
    Fired(Firing),
    Skipped(Skip),
}

/// Scans the priority list from the top and fires the first eligible action.
///
/// Returns `None` when a full scan fires nothing.
pub(crate) fn select<A, P>(
    actions: &[Action<A>],
    model: &mut A,
    ctx: &mut ActorContext,
    ports: &mut P,
) -> Result<Option<Firing>, FiringError>
where
    A: Actor,
    P: PortStore + ?Sized,
{
    for (priority, action) in actions.iter().enumerate() {
        match try_fire(priority, action, model, ctx, ports)? {
            Attempt::Fired(firing) => return Ok(Some(firing)),
            Attempt::Skipped(reason) => {
                trace!(actor = %ctx.actor_ref(), action = action.name, priority, %reason, "Not eligible");
            }
        }
    }
    Ok(None)
}

pub(crate) fn try_fire<A, P>(
    priority: usize,
    action: &Action<A>,
    model: &mut A,
    ctx: &mut ActorContext,
    ports: &mut P,
) -> Result<Attempt, FiringError>
where
    A: Actor,
    P: PortStore + ?Sized,
{
    let actor = ctx.actor_ref().clone();

    if let Some(guard) = action.guard {
        if !guard(model, ctx) {
            return Ok(Attempt::Skipped(Skip::Guard));
        }
    }
    for demand in action.input_demand() {
        if !ports.tokens_available(&actor, demand.port, demand.count)? {
            return Ok(Attempt::Skipped(Skip::Tokens(demand.port)));
        }
    }
    for demand in action.output_demand() {
        if !ports.slots_available(&actor, demand.port, demand.count)? {
            return Ok(Attempt::Skipped(Skip::Slots(demand.port)));
        }
    }

    let input_ports = action.input_ports();
    let mut tokens = Vec::new();
    for input in &action.inputs {
        match ports.peek(&actor, input.port, input.count) {
            Ok(peeked) => tokens.extend(peeked),
            Err(e) => return Err(cancel(ports, &actor, &input_ports, e.into())),
        }
    }
    let consumed = tokens.len();

    let exception = tokens.iter().find_map(|token| match token {
        Token::Exception(exception) => Some(exception.clone()),
        Token::Data(_) => None,
    });
    let outcome = match exception {
        Some(exception) => match handle_exception(action, model, ctx, &exception) {
            Ok(outcome) => outcome,
            Err(e) => return Err(cancel(ports, &actor, &input_ports, e)),
        },
        None => {
            let values: Vec<Value> = tokens.into_iter().filter_map(|token| token.into_value().ok()).collect();
            if let Some(input_guard) = action.input_guard {
                if !input_guard(model, ctx, &values) {
                    ports.peek_cancel(&actor, &input_ports)?;
                    return Ok(Attempt::Skipped(Skip::InputGuard));
                }
            }
            match (action.body)(model, ctx, values) {
                Ok(outcome) => outcome,
                Err(source) => {
                    error!(%actor, action = action.name, "Action failed: {source:#}");
                    let e = FiringError::ActionFailed {
                        actor: actor.clone(),
                        action: action.name,
                        source,
                    };
                    return Err(cancel(ports, &actor, &input_ports, e));
                }
            }
        }
    };

    let produced = match outcome {
        ActionResult::Fired(false) => {
            ports.peek_cancel(&actor, &input_ports)?;
            return Ok(Attempt::Skipped(Skip::Declined));
        }
        ActionResult::Fired(true) => Vec::new(),
        ActionResult::Produced(values) => values,
    };

    let expected = action.output_arity();
    if produced.len() != expected {
        error!(
            %actor,
            action = action.name,
            expected,
            produced = produced.len(),
            "Invalid production"
        );
        let e = FiringError::InvalidProduction {
            actor: actor.clone(),
            action: action.name,
            expected,
            produced: produced.len(),
        };
        return Err(cancel(ports, &actor, &input_ports, e));
    }

    // Slots were confirmed above, so the writes after the commit cannot fail.
    let exhausted = ports.peek_commit(&actor, &input_ports)?;
    let mut values = produced.into_iter();
    for output in &action.outputs {
        for value in values.by_ref().take(output.count) {
            ports.write(&actor, output.port, Token::Data(value))?;
        }
    }

    trace!(%actor, action = action.name, priority, consumed, produced = expected, "Fired");
    Ok(Attempt::Fired(Firing::new(
        action.name,
        priority,
        consumed,
        expected,
        exhausted,
    )))
}

fn handle_exception<A: Actor>(
    action: &Action<A>,
    model: &mut A,
    ctx: &mut ActorContext,
    exception: &ExceptionToken,
) -> Result<ActionResult, FiringError> {
    model.exception_handler(ctx, action.name, exception).map_err(|source| {
        error!(actor = %ctx.actor_ref(), action = action.name, reason = %exception.reason, "Unhandled exception token: {source:#}");
        FiringError::UnhandledException {
            actor: ctx.actor_ref().clone(),
            action: action.name,
            reason: exception.reason.clone(),
            source,
        }
    })
}

/// Restores every peeked input port and hands back the error that caused it.
fn cancel<P: PortStore + ?Sized>(
    ports: &mut P,
    actor: &ActorRef,
    input_ports: &[&str],
    error: FiringError,
) -> FiringError {
    if let Err(cancel_error) = ports.peek_cancel(actor, input_ports) {
        error!(%actor, "Failed to cancel peek: {cancel_error}");
    }
    error
}
