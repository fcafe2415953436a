//! Builder for constructing game machines.

use crate::core::{Context, GameEvent, GameState, Guard, TransitionHistory};
use crate::machine::{GameMachine, StateHook, TransitionHook, TransitionTable};
use serde_json::Value;
use std::collections::HashMap;

/// The default lifecycle transition table shared by every game.
///
/// Builders start from this table and merge caller additions over it;
/// nothing in it can be removed.
pub fn default_transitions() -> TransitionTable {
    let mut table = TransitionTable::new();

    table.insert(
        GameState::Start,
        HashMap::from([(GameEvent::StartGame, GameState::Playing)]),
    );
    table.insert(
        GameState::Playing,
        HashMap::from([
            (GameEvent::Pause, GameState::Paused),
            (GameEvent::GameOver, GameState::GameOver),
            (GameEvent::Win, GameState::Won),
            (GameEvent::LevelComplete, GameState::LevelComplete),
        ]),
    );
    table.insert(
        GameState::Paused,
        HashMap::from([
            (GameEvent::Resume, GameState::Playing),
            (GameEvent::Restart, GameState::Playing),
            (GameEvent::Quit, GameState::Start),
        ]),
    );
    table.insert(
        GameState::GameOver,
        HashMap::from([
            (GameEvent::Restart, GameState::Playing),
            (GameEvent::Quit, GameState::Start),
        ]),
    );
    table.insert(
        GameState::Won,
        HashMap::from([
            (GameEvent::Continue, GameState::Playing),
            (GameEvent::Restart, GameState::Playing),
            (GameEvent::Quit, GameState::Start),
        ]),
    );
    table.insert(
        GameState::LevelComplete,
        HashMap::from([
            (GameEvent::NextLevel, GameState::Playing),
            (GameEvent::Restart, GameState::Playing),
            (GameEvent::Quit, GameState::Start),
        ]),
    );

    table
}

/// Builder for [`GameMachine`] with a fluent API.
///
/// The builder starts from the default transition table, so `build` always
/// yields a valid machine. Transition targets that are not themselves table
/// keys are tolerated but logged at build time.
///
/// # Example
///
/// ```rust
/// use playcore::core::{GameEvent, GameState};
/// use playcore::machine::GameMachineBuilder;
///
/// let mut machine = GameMachineBuilder::new()
///     .transition(
///         GameState::Playing,
///         GameEvent::custom("BONUS"),
///         GameState::custom("BONUS_ROUND"),
///     )
///     .transition(
///         GameState::custom("BONUS_ROUND"),
///         GameEvent::Resume,
///         GameState::Playing,
///     )
///     .track_history(16)
///     .build();
///
/// assert_eq!(machine.current(), &GameState::Start);
/// assert!(machine.start_game());
/// assert!(machine.send(&GameEvent::custom("BONUS")));
/// assert_eq!(machine.current(), &GameState::custom("BONUS_ROUND"));
/// ```
pub struct GameMachineBuilder {
    initial: GameState,
    table: TransitionTable,
    guards: HashMap<GameEvent, Guard>,
    enter_hooks: HashMap<GameState, StateHook>,
    exit_hooks: HashMap<GameState, StateHook>,
    global_hook: Option<TransitionHook>,
    history_capacity: Option<usize>,
}

impl GameMachineBuilder {
    /// Create a builder seeded with the default lifecycle table, starting
    /// at [`GameState::Start`], with history tracking off.
    pub fn new() -> Self {
        Self {
            initial: GameState::Start,
            table: default_transitions(),
            guards: HashMap::new(),
            enter_hooks: HashMap::new(),
            exit_hooks: HashMap::new(),
            global_hook: None,
            history_capacity: None,
        }
    }

    /// Override the initial state.
    pub fn initial(mut self, state: GameState) -> Self {
        self.initial = state;
        self
    }

    /// Merge a transition over the default table. Adding a transition for a
    /// new state adds that state to the table.
    pub fn transition(mut self, from: GameState, event: GameEvent, to: GameState) -> Self {
        self.table.entry(from).or_default().insert(event, to);
        self
    }

    /// Register a guard for an event. The guard applies to that event from
    /// every source state; at most one guard per event (last one wins).
    pub fn guard<F>(mut self, event: GameEvent, predicate: F) -> Self
    where
        F: Fn(&Context, &GameState, &Value) -> bool + Send + Sync + 'static,
    {
        self.guards.insert(event, Guard::new(predicate));
        self
    }

    /// Register an enter hook for a state, invoked with
    /// `(context, previous_state, event, payload)` after the state change.
    pub fn on_enter<F>(mut self, state: GameState, hook: F) -> Self
    where
        F: FnMut(&Context, &GameState, &GameEvent, &Value) + Send + 'static,
    {
        self.enter_hooks.insert(state, Box::new(hook));
        self
    }

    /// Register an exit hook for a state, invoked with
    /// `(context, next_state, event, payload)` before the state change.
    pub fn on_exit<F>(mut self, state: GameState, hook: F) -> Self
    where
        F: FnMut(&Context, &GameState, &GameEvent, &Value) + Send + 'static,
    {
        self.exit_hooks.insert(state, Box::new(hook));
        self
    }

    /// Register the global transition hook, invoked last on every
    /// successful transition with `(context, from, to, event, payload)`.
    pub fn on_transition<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&Context, &GameState, &GameState, &GameEvent, &Value) + Send + 'static,
    {
        self.global_hook = Some(Box::new(hook));
        self
    }

    /// Enable bounded history tracking with the given capacity.
    pub fn track_history(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }

    /// Build the machine. Always succeeds; unknown transition targets are
    /// logged, not rejected.
    pub fn build(self) -> GameMachine {
        for (from, events) in &self.table {
            for (event, target) in events {
                if !self.table.contains_key(target) {
                    log::warn!(
                        "transition target {target} (from {from} on {event}) is not a known state"
                    );
                }
            }
        }

        GameMachine::from_parts(
            self.initial,
            self.table,
            self.guards,
            self.enter_hooks,
            self.exit_hooks,
            self.global_hook,
            self.history_capacity.map(TransitionHistory::with_capacity),
        )
    }
}

impl Default for GameMachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_default_state() {
        let table = default_transitions();
        for state in [
            GameState::Start,
            GameState::Playing,
            GameState::Paused,
            GameState::GameOver,
            GameState::Won,
            GameState::LevelComplete,
        ] {
            assert!(table.contains_key(&state), "missing entry for {state}");
        }
    }

    #[test]
    fn default_table_targets_are_all_known_states() {
        let table = default_transitions();
        for events in table.values() {
            for target in events.values() {
                assert!(table.contains_key(target));
            }
        }
    }

    #[test]
    fn builder_defaults_to_start_state() {
        let machine = GameMachineBuilder::new().build();
        assert_eq!(machine.current(), &GameState::Start);
        assert!(machine.previous().is_none());
    }

    #[test]
    fn added_transitions_merge_over_defaults() {
        let mut machine = GameMachineBuilder::new()
            .transition(
                GameState::Playing,
                GameEvent::custom("WARP"),
                GameState::LevelComplete,
            )
            .build();

        assert!(machine.start_game());
        assert!(machine.send(&GameEvent::custom("WARP")));
        assert_eq!(machine.current(), &GameState::LevelComplete);
        // Default transitions still present.
        assert!(machine.next_level());
    }

    #[test]
    fn initial_state_can_be_overridden() {
        let machine = GameMachineBuilder::new()
            .initial(GameState::Playing)
            .build();
        assert_eq!(machine.current(), &GameState::Playing);
    }

    #[test]
    fn unknown_target_is_tolerated() {
        // Target state has no table entry of its own; build still succeeds.
        let mut machine = GameMachineBuilder::new()
            .transition(
                GameState::Playing,
                GameEvent::custom("EJECT"),
                GameState::custom("LIMBO"),
            )
            .build();

        assert!(machine.start_game());
        assert!(machine.send(&GameEvent::custom("EJECT")));
        assert_eq!(machine.current(), &GameState::custom("LIMBO"));
        // No transitions out of the unknown target.
        assert!(machine.available_events().is_empty());
    }
}
