//! The input dispatcher: raw key and touch signals in, abstract events out.

use super::event::{Direction, Dispatch, InputEvent};
use crate::core::GameState;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Dispatcher configuration, fully resolved at construction.
///
/// Key identifiers use the platform's key names (`"ArrowLeft"`, `"p"`,
/// `" "`, ...). Categories are matched in priority order: pause, start,
/// action, direction; the first match wins.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputConfig {
    pub pause_keys: Vec<String>,
    pub start_keys: Vec<String>,
    pub action_keys: Vec<String>,
    pub direction_keys: HashMap<String, Direction>,
    /// Suppress the platform default for matched keys.
    pub suppress_default: bool,
    /// Treat an open modal as blocking all input.
    pub block_when_modal_open: bool,
    /// External game states in which input is ignored.
    pub disabled_states: HashSet<GameState>,
    /// Minimum displacement on some axis for a touch to count as a swipe.
    pub swipe_min_distance: f32,
    /// Touches slower than this are potential scrolls, not gestures.
    pub swipe_max_duration: Duration,
    /// Emit a `Direction` event alongside each `Swipe` event.
    pub directional_swipes: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        let mut direction_keys = HashMap::new();
        for (key, direction) in [
            ("ArrowUp", Direction::Up),
            ("w", Direction::Up),
            ("W", Direction::Up),
            ("ArrowDown", Direction::Down),
            ("s", Direction::Down),
            ("S", Direction::Down),
            ("ArrowLeft", Direction::Left),
            ("a", Direction::Left),
            ("A", Direction::Left),
            ("ArrowRight", Direction::Right),
            ("d", Direction::Right),
            ("D", Direction::Right),
        ] {
            direction_keys.insert(key.to_string(), direction);
        }

        Self {
            pause_keys: vec!["Escape".to_string(), "p".to_string(), "P".to_string()],
            start_keys: vec!["Enter".to_string()],
            action_keys: vec![" ".to_string()],
            direction_keys,
            suppress_default: true,
            block_when_modal_open: true,
            disabled_states: HashSet::new(),
            swipe_min_distance: 50.0,
            swipe_max_duration: Duration::from_millis(1000),
            directional_swipes: true,
        }
    }
}

/// Normalizes keyboard and touch input behind an activity gate.
///
/// The dispatcher owns the pressed-key set and the in-flight touch origin.
/// While inactive (disabled, blocked by a modal, or in a disabled game
/// state) no signal produces an event and the pressed set stays empty.
///
/// # Example
///
/// ```rust
/// use playcore::input::{Direction, InputConfig, InputDispatcher, InputEvent};
///
/// let mut input = InputDispatcher::new(InputConfig::default());
///
/// let dispatch = input.key_down("ArrowLeft").unwrap();
/// assert_eq!(dispatch.event, InputEvent::Direction(Direction::Left));
/// assert!(input.is_pressed("ArrowLeft"));
///
/// input.key_up("ArrowLeft");
/// assert!(!input.is_pressed("ArrowLeft"));
/// ```
pub struct InputDispatcher {
    config: InputConfig,
    enabled: bool,
    modal_open: bool,
    game_state: GameState,
    pressed: HashSet<String>,
    touch_origin: Option<(f32, f32, Instant)>,
}

impl InputDispatcher {
    /// Create an enabled dispatcher. The external game state starts at
    /// [`GameState::Start`] until the orchestrator feeds updates.
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            enabled: true,
            modal_open: false,
            game_state: GameState::Start,
            pressed: HashSet::new(),
            touch_origin: None,
        }
    }

    /// The combined activity gate: enabled, not blocked by a modal, and not
    /// in a disabled game state.
    pub fn is_active(&self) -> bool {
        self.enabled
            && !(self.config.block_when_modal_open && self.modal_open)
            && !self.config.disabled_states.contains(&self.game_state)
    }

    /// Enable or disable the dispatcher. Disabling clears held keys.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.clear_if_inactive();
    }

    /// Record whether a blocking modal is open.
    pub fn set_modal_open(&mut self, open: bool) {
        self.modal_open = open;
        self.clear_if_inactive();
    }

    /// Feed the current external game state.
    pub fn set_game_state(&mut self, state: GameState) {
        self.game_state = state;
        self.clear_if_inactive();
    }

    /// Process a key-down. Inactive: the pressed set is cleared and nothing
    /// fires. Active: the key joins the pressed set and the first matching
    /// category (pause, start, action, direction) determines the event;
    /// unmatched keys fall through as [`InputEvent::Other`] with no default
    /// suppression.
    pub fn key_down(&mut self, key: &str) -> Option<Dispatch> {
        if !self.is_active() {
            self.pressed.clear();
            return None;
        }
        self.pressed.insert(key.to_string());

        let event = if self.config.pause_keys.iter().any(|k| k == key) {
            InputEvent::Pause
        } else if self.config.start_keys.iter().any(|k| k == key) {
            InputEvent::Start
        } else if self.config.action_keys.iter().any(|k| k == key) {
            InputEvent::Action
        } else if let Some(direction) = self.config.direction_keys.get(key) {
            InputEvent::Direction(*direction)
        } else {
            return Some(Dispatch {
                event: InputEvent::Other(key.to_string()),
                suppress_default: false,
            });
        };

        Some(Dispatch {
            event,
            suppress_default: self.config.suppress_default,
        })
    }

    /// Process a key-up. The key leaves the pressed set unconditionally,
    /// even while inactive, so re-enabling never resurrects stale holds.
    pub fn key_up(&mut self, key: &str) {
        self.pressed.remove(key);
    }

    /// Whether a key is currently held.
    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }

    /// Snapshot of currently held keys, in no particular order.
    pub fn pressed_keys(&self) -> Vec<&str> {
        self.pressed.iter().map(String::as_str).collect()
    }

    /// Record a touch origin. Ignored while inactive.
    pub fn touch_start(&mut self, x: f32, y: f32, at: Instant) {
        if !self.is_active() {
            self.touch_origin = None;
            return;
        }
        self.touch_origin = Some((x, y, at));
    }

    /// Resolve a touch-end against the recorded origin. A swipe is
    /// recognized only when the touch was fast enough and moved far enough
    /// on some axis; the larger-magnitude axis picks the direction, with
    /// equal magnitudes resolving vertical. Emits the swipe event and, when
    /// directional swipes are on, the matching direction event.
    pub fn touch_end(&mut self, x: f32, y: f32, at: Instant) -> Vec<InputEvent> {
        let Some((ox, oy, started)) = self.touch_origin.take() else {
            return Vec::new();
        };
        if !self.is_active() {
            return Vec::new();
        }

        let elapsed = at.saturating_duration_since(started);
        if elapsed > self.config.swipe_max_duration {
            return Vec::new();
        }

        let dx = x - ox;
        let dy = y - oy;
        let abs_x = dx.abs();
        let abs_y = dy.abs();
        let threshold = self.config.swipe_min_distance;
        if abs_x <= threshold && abs_y <= threshold {
            return Vec::new();
        }

        // Ties resolve vertical: the branch condition is abs_x > abs_y.
        let direction = if abs_x > abs_y {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };

        let mut events = vec![InputEvent::Swipe(direction)];
        if self.config.directional_swipes {
            events.push(InputEvent::Direction(direction));
        }
        events
    }

    /// Drop all held keys and any in-flight touch. Used on teardown.
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.touch_origin = None;
    }

    fn clear_if_inactive(&mut self) {
        if !self.is_active() {
            self.pressed.clear();
            self.touch_origin = None;
        }
    }
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
