//! Bounded transition history.
//!
//! When tracking is enabled, the machine appends one record per successful
//! transition. The buffer is bounded: appending at capacity evicts the
//! oldest record first.

use super::state::{GameEvent, GameState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of records kept when history tracking is enabled.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Record of a single successful transition.
///
/// # Example
///
/// ```rust
/// use playcore::core::{GameEvent, GameState, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: GameState::Start,
///     to: GameState::Playing,
///     event: GameEvent::StartGame,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.event, GameEvent::StartGame);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being transitioned from
    pub from: GameState,
    /// The state being transitioned to
    pub to: GameState,
    /// The event that triggered the transition
    pub event: GameEvent,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of transitions (ring-buffer semantics).
///
/// # Example
///
/// ```rust
/// use playcore::core::{GameEvent, GameState, TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = TransitionHistory::with_capacity(2);
/// for event in [GameEvent::StartGame, GameEvent::Pause, GameEvent::Resume] {
///     history.record(TransitionRecord {
///         from: GameState::Start,
///         to: GameState::Playing,
///         event,
///         timestamp: Utc::now(),
///     });
/// }
///
/// // Capacity 2: the first record was evicted.
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.iter().next().unwrap().event, GameEvent::Pause);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory {
    records: VecDeque<TransitionRecord>,
    capacity: usize,
}

impl TransitionHistory {
    /// Create an empty history holding at most `capacity` records.
    ///
    /// A zero capacity is bumped to one so that `record` always keeps the
    /// most recent transition.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest when at capacity.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Iterate over records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    /// The most recent record.
    pub fn latest(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records held before eviction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all records. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for TransitionHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}
