//! Refusal reasons for proposed transitions.

use thiserror::Error;

/// Why a proposed event did not transition the machine.
///
/// Refusals are advisory, never fatal: `send` reports them as `false` after
/// logging, while `try_send` surfaces the reason directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("no transition for event {event} from state {state}")]
    NoTransition { state: String, event: String },

    #[error("guard rejected event {event} in state {state}")]
    GuardRejected { state: String, event: String },
}
