//! Playcore: the shared runtime core for a family of small arcade games.
//!
//! Three cooperating pieces give every game the same lifecycle semantics and
//! the same audio-visual transition behavior without per-game duplication:
//!
//! - **Game machine** ([`machine`]): a table-driven finite-state machine over
//!   lifecycle states, with guards, enter/exit/global hooks, a machine-owned
//!   context bag, and bounded transition history.
//! - **Fade sequencer** ([`fade`]): a three-phase opacity sequence
//!   (fade-in → hold → fade-out) whose midpoint callback marks the safe
//!   moment to swap scene content behind a fully opaque overlay.
//! - **Input dispatcher** ([`input`]): normalizes keyboard and touch signals
//!   into abstract command events behind an activity gate.
//!
//! The crate renders nothing and persists nothing; it knows only abstract
//! state names and transition payloads. Misuse is advisory, never fatal:
//! refused events log and report `false`, they never panic.
//!
//! # Example
//!
//! ```rust
//! use playcore::core::GameState;
//! use playcore::input::{InputConfig, InputDispatcher, InputEvent};
//! use playcore::machine::GameMachineBuilder;
//!
//! let mut machine = GameMachineBuilder::new().track_history(32).build();
//! let mut input = InputDispatcher::new(InputConfig::default());
//!
//! // A normalized pause key press drives the machine.
//! machine.start_game();
//! if let Some(dispatch) = input.key_down("Escape") {
//!     if dispatch.event == InputEvent::Pause {
//!         machine.pause();
//!     }
//! }
//! assert_eq!(machine.current(), &GameState::Paused);
//! ```

pub mod core;
pub mod fade;
pub mod input;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{Context, GameEvent, GameState, Guard, TransitionHistory, TransitionRecord};
pub use crate::fade::{FadeSequencer, FadeTiming, Phase};
pub use crate::input::{Direction, InputConfig, InputDispatcher, InputEvent};
pub use crate::machine::{GameMachine, GameMachineBuilder, SendError};
