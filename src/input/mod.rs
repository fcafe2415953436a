//! Input normalization.
//!
//! Raw keyboard and touch signals come in through the dispatcher; abstract
//! [`InputEvent`]s come out, gated by dispatcher activity. Keyboard keys and
//! swipe gestures resolve into the same directional vocabulary so each game
//! handles one input stream, not two.

mod dispatcher;
mod event;

pub use dispatcher::{InputConfig, InputDispatcher};
pub use event::{Direction, Dispatch, InputEvent};
