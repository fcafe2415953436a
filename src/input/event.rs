//! Abstract input vocabulary shared by every game.

use serde::{Deserialize, Serialize};

/// A directional command, from arrow/WASD keys or a swipe.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A normalized input event. Keyboard and touch both resolve into this
/// vocabulary, so downstream consumers never see raw platform signals.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum InputEvent {
    /// A directional command (key or, when enabled, swipe).
    Direction(Direction),
    Pause,
    Start,
    Action,
    /// A recognized swipe gesture. When directional swipes are enabled the
    /// dispatcher also emits the matching `Direction` event.
    Swipe(Direction),
    /// A key that matched no configured category.
    Other(String),
}

/// A key-down outcome: the event plus whether the platform layer should
/// suppress the key's default behavior.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Dispatch {
    pub event: InputEvent,
    pub suppress_default: bool,
}
