//! The lifecycle state machine.
//!
//! A table-driven machine: states map to the events legal from them, events
//! map to target states. Guards veto events, enter/exit hooks observe the
//! states around a transition, and one global hook observes every
//! transition. Refusals are advisory — the machine logs and reports `false`,
//! it never panics on unrecognized input.

mod builder;
mod error;

pub use builder::{default_transitions, GameMachineBuilder};
pub use error::SendError;

use crate::core::{Context, GameEvent, GameState, Guard, TransitionHistory, TransitionRecord};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;

/// Two-level transition lookup: state, then event, then target state.
pub type TransitionTable = HashMap<GameState, HashMap<GameEvent, GameState>>;

/// Hook observing one side of a transition:
/// `(context, other_state, event, payload)`. For enter hooks the other
/// state is the previous one; for exit hooks it is the next one.
pub type StateHook = Box<dyn FnMut(&Context, &GameState, &GameEvent, &Value) + Send>;

/// Hook observing every successful transition:
/// `(context, from, to, event, payload)`.
pub type TransitionHook =
    Box<dyn FnMut(&Context, &GameState, &GameState, &GameEvent, &Value) + Send>;

/// Table-driven lifecycle state machine for one game session.
///
/// Create one via [`GameMachineBuilder`], drive it with [`send`] or the
/// named convenience methods, and read `current`/`previous` to render.
///
/// [`send`]: GameMachine::send
///
/// # Example
///
/// ```rust
/// use playcore::core::GameState;
/// use playcore::machine::GameMachineBuilder;
///
/// let mut machine = GameMachineBuilder::new().build();
///
/// assert!(machine.start_game());
/// assert!(machine.pause());
/// assert_eq!(machine.current(), &GameState::Paused);
///
/// // PAUSE is not legal from PAUSED: refused, nothing changes.
/// assert!(!machine.pause());
/// assert_eq!(machine.current(), &GameState::Paused);
///
/// assert!(machine.resume());
/// assert_eq!(machine.current(), &GameState::Playing);
/// ```
pub struct GameMachine {
    initial: GameState,
    current: GameState,
    previous: Option<GameState>,
    table: TransitionTable,
    guards: HashMap<GameEvent, Guard>,
    enter_hooks: HashMap<GameState, StateHook>,
    exit_hooks: HashMap<GameState, StateHook>,
    global_hook: Option<TransitionHook>,
    context: Context,
    history: Option<TransitionHistory>,
}

impl GameMachine {
    pub(crate) fn from_parts(
        initial: GameState,
        table: TransitionTable,
        guards: HashMap<GameEvent, Guard>,
        enter_hooks: HashMap<GameState, StateHook>,
        exit_hooks: HashMap<GameState, StateHook>,
        global_hook: Option<TransitionHook>,
        history: Option<TransitionHistory>,
    ) -> Self {
        Self {
            current: initial.clone(),
            initial,
            previous: None,
            table,
            guards,
            enter_hooks,
            exit_hooks,
            global_hook,
            context: Context::new(),
            history,
        }
    }

    /// Propose an event with no payload. Returns whether it transitioned.
    pub fn send(&mut self, event: &GameEvent) -> bool {
        self.send_with(event, Value::Null)
    }

    /// Propose an event with a payload. Returns whether it transitioned.
    ///
    /// A refused event (no table entry for the current state, or guard veto)
    /// mutates nothing, logs a diagnostic, and returns `false`.
    pub fn send_with(&mut self, event: &GameEvent, payload: Value) -> bool {
        match self.try_send_with(event, payload) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    /// Like [`send`](Self::send), but surfaces the refusal reason.
    pub fn try_send(&mut self, event: &GameEvent) -> Result<(), SendError> {
        self.try_send_with(event, Value::Null)
    }

    /// Like [`send_with`](Self::send_with), but surfaces the refusal reason.
    ///
    /// On success, side effects run in order: exit hook of the old state,
    /// history append, state change, enter hook of the new state, global
    /// hook. On refusal nothing runs.
    pub fn try_send_with(&mut self, event: &GameEvent, payload: Value) -> Result<(), SendError> {
        let next = self
            .table
            .get(&self.current)
            .and_then(|events| events.get(event))
            .cloned()
            .ok_or_else(|| SendError::NoTransition {
                state: self.current.name().to_string(),
                event: event.name().to_string(),
            })?;

        if let Some(guard) = self.guards.get(event) {
            if !guard.check(&self.context, &self.current, &payload) {
                return Err(SendError::GuardRejected {
                    state: self.current.name().to_string(),
                    event: event.name().to_string(),
                });
            }
        }

        if let Some(hook) = self.exit_hooks.get_mut(&self.current) {
            hook(&self.context, &next, event, &payload);
        }

        if let Some(history) = &mut self.history {
            history.record(TransitionRecord {
                from: self.current.clone(),
                to: next.clone(),
                event: event.clone(),
                timestamp: Utc::now(),
            });
        }

        let prev = std::mem::replace(&mut self.current, next);
        self.previous = Some(prev.clone());

        if let Some(hook) = self.enter_hooks.get_mut(&self.current) {
            hook(&self.context, &prev, event, &payload);
        }
        if let Some(hook) = &mut self.global_hook {
            hook(&self.context, &prev, &self.current, event, &payload);
        }

        Ok(())
    }

    /// Check whether `send(event)` would transition right now. No side
    /// effects; agrees with `send` for a fixed context/state snapshot.
    pub fn can_transition(&self, event: &GameEvent) -> bool {
        let has_entry = self
            .table
            .get(&self.current)
            .map(|events| events.contains_key(event))
            .unwrap_or(false);
        if !has_entry {
            return false;
        }
        match self.guards.get(event) {
            Some(guard) => guard.check(&self.context, &self.current, &Value::Null),
            None => true,
        }
    }

    /// Events with a table entry from the current state, in no particular
    /// order. Guards are not consulted here.
    pub fn available_events(&self) -> Vec<GameEvent> {
        self.table
            .get(&self.current)
            .map(|events| events.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Unconditionally set the state, bypassing table and guards. No hooks
    /// run and no history is recorded. An escape hatch, not a normal-path
    /// operation; unrecognized states are logged but honored.
    pub fn force_state(&mut self, state: GameState) {
        if !self.table.contains_key(&state) {
            log::warn!("forcing unrecognized state {state}");
        }
        let prev = std::mem::replace(&mut self.current, state);
        self.previous = Some(prev);
    }

    /// Return to the initial state and clear history. Distinguished from a
    /// normal transition: no exit/enter/global hooks run.
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
        self.previous = None;
        if let Some(history) = &mut self.history {
            history.clear();
        }
    }

    /// The current state.
    pub fn current(&self) -> &GameState {
        &self.current
    }

    /// The state before the last transition or force, if any.
    pub fn previous(&self) -> Option<&GameState> {
        self.previous.as_ref()
    }

    /// Check the current state against a candidate.
    pub fn is_in(&self, state: &GameState) -> bool {
        &self.current == state
    }

    /// The bounded transition history, if tracking was enabled.
    pub fn history(&self) -> Option<&TransitionHistory> {
        self.history.as_ref()
    }

    /// Read a context value.
    pub fn get_context(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    /// Write a context value. The context is machine-owned; this accessor
    /// is the only write path, so guard evaluation never races a mutation.
    pub fn set_context(&mut self, key: impl Into<String>, value: Value) {
        self.context.set(key, value);
    }

    /// Remove a context value, returning it if present.
    pub fn remove_context(&mut self, key: &str) -> Option<Value> {
        self.context.remove(key)
    }

    // Named wrappers over `send`, one per lifecycle event.

    pub fn start_game(&mut self) -> bool {
        self.send(&GameEvent::StartGame)
    }

    pub fn pause(&mut self) -> bool {
        self.send(&GameEvent::Pause)
    }

    pub fn resume(&mut self) -> bool {
        self.send(&GameEvent::Resume)
    }

    pub fn restart(&mut self) -> bool {
        self.send(&GameEvent::Restart)
    }

    pub fn quit(&mut self) -> bool {
        self.send(&GameEvent::Quit)
    }

    pub fn game_over(&mut self) -> bool {
        self.send(&GameEvent::GameOver)
    }

    pub fn win(&mut self) -> bool {
        self.send(&GameEvent::Win)
    }

    pub fn next_level(&mut self) -> bool {
        self.send(&GameEvent::NextLevel)
    }

    pub fn continue_game(&mut self) -> bool {
        self.send(&GameEvent::Continue)
    }

    pub fn level_complete(&mut self) -> bool {
        self.send(&GameEvent::LevelComplete)
    }
}
