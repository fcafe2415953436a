//! Guard predicates for controlling state transitions.
//!
//! Guards are boolean functions that determine whether a proposed event may
//! transition the machine. A guard is keyed by event and applies globally:
//! it gates that event regardless of which state the machine is in.

use super::context::Context;
use super::state::GameState;
use serde_json::Value;

/// Predicate that determines if an event is allowed to transition.
///
/// The predicate sees the machine's context, the current state, and the
/// payload of the proposed event. A vetoed event causes no mutation and no
/// hook invocation.
///
/// # Example
///
/// ```rust
/// use playcore::core::{Context, GameState, Guard};
/// use serde_json::{json, Value};
///
/// // Only allow starting once the player has credits.
/// let has_credits = Guard::new(|ctx: &Context, _state: &GameState, _payload: &Value| {
///     ctx.get("credits").and_then(Value::as_u64).unwrap_or(0) > 0
/// });
///
/// let mut ctx = Context::new();
/// assert!(!has_credits.check(&ctx, &GameState::Start, &Value::Null));
///
/// ctx.set("credits", json!(1));
/// assert!(has_credits.check(&ctx, &GameState::Start, &Value::Null));
/// ```
pub struct Guard {
    predicate: Box<dyn Fn(&Context, &GameState, &Value) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a predicate function.
    ///
    /// The predicate should be deterministic for a fixed context/state/
    /// payload snapshot, so that `can_transition` and `send` agree.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Context, &GameState, &Value) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard. No side effects.
    pub fn check(&self, context: &Context, state: &GameState, payload: &Value) -> bool {
        (self.predicate)(context, state, payload)
    }
}
