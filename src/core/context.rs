//! Machine-owned context bag available to guards and hooks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Opaque key/value data owned by a state machine instance.
///
/// Guards and hooks receive a shared reference to the context; callers read
/// and write it only through the machine's `get_context`/`set_context`
/// accessors, which keeps guard evaluation and the subsequent mutation
/// atomic with respect to outside writes.
///
/// The context is not reset on transition. Its lifecycle is the caller's.
///
/// # Example
///
/// ```rust
/// use playcore::core::Context;
/// use serde_json::json;
///
/// let mut ctx = Context::new();
/// ctx.set("lives", json!(3));
/// assert_eq!(ctx.get("lives"), Some(&json!(3)));
/// assert!(ctx.get("score").is_none());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Write a value, replacing any previous value under the key.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Remove a value, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Drop every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
