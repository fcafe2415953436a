//! Lifecycle states and events for a game session.
//!
//! The default vocabulary is a closed set covering the common arcade
//! lifecycle. Callers that need more merge extra states or events over the
//! defaults through the `Custom` variants — the default set is never removed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named lifecycle stage of a game session.
///
/// Exactly one state is current per machine instance. The six default
/// variants cover the shared arcade lifecycle; `Custom` carries any state a
/// caller merges over the defaults.
///
/// # Example
///
/// ```rust
/// use playcore::core::GameState;
///
/// let state = GameState::Playing;
/// assert_eq!(state.name(), "PLAYING");
///
/// let bonus = GameState::custom("BONUS_ROUND");
/// assert_eq!(bonus.name(), "BONUS_ROUND");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GameState {
    Start,
    Playing,
    Paused,
    GameOver,
    Won,
    LevelComplete,
    /// A caller-defined state merged over the defaults.
    Custom(String),
}

impl GameState {
    /// Get the state's name for display/logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Start => "START",
            Self::Playing => "PLAYING",
            Self::Paused => "PAUSED",
            Self::GameOver => "GAME_OVER",
            Self::Won => "WON",
            Self::LevelComplete => "LEVEL_COMPLETE",
            Self::Custom(name) => name,
        }
    }

    /// Shorthand for building a caller-defined state.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Check if this state ends a run (no gameplay continues from it
    /// without an explicit restart/quit/continue).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named trigger proposed to the state machine to request a transition.
///
/// # Example
///
/// ```rust
/// use playcore::core::GameEvent;
///
/// assert_eq!(GameEvent::StartGame.name(), "START_GAME");
/// assert_eq!(GameEvent::custom("CHEAT").name(), "CHEAT");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GameEvent {
    StartGame,
    Pause,
    Resume,
    Restart,
    Quit,
    GameOver,
    Win,
    NextLevel,
    Continue,
    LevelComplete,
    /// A caller-defined event merged over the defaults.
    Custom(String),
}

impl GameEvent {
    /// Get the event's name for display/logging.
    pub fn name(&self) -> &str {
        match self {
            Self::StartGame => "START_GAME",
            Self::Pause => "PAUSE",
            Self::Resume => "RESUME",
            Self::Restart => "RESTART",
            Self::Quit => "QUIT",
            Self::GameOver => "GAME_OVER",
            Self::Win => "WIN",
            Self::NextLevel => "NEXT_LEVEL",
            Self::Continue => "CONTINUE",
            Self::LevelComplete => "LEVEL_COMPLETE",
            Self::Custom(name) => name,
        }
    }

    /// Shorthand for building a caller-defined event.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
