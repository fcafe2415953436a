//! Core data types shared by the runtime components:
//! - Lifecycle states and events
//! - The machine-owned context bag
//! - Guard predicates for transition control
//! - Bounded transition history

mod context;
mod guard;
mod history;
mod state;

pub use context::Context;
pub use guard::Guard;
pub use history::{TransitionHistory, TransitionRecord, DEFAULT_HISTORY_CAPACITY};
pub use state::{GameEvent, GameState};
