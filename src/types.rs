//! Core state types.
//!
//! A [`State`] maps top-level keys to shared [`Slot`]s. Cloning a `State` is a
//! shallow copy: the key map is duplicated, the slots are not. Replacing a key
//! on a copy never reaches the store. A slot's value itself cannot be swapped
//! out, only the contents of a nested object or array can be edited, and
//! those edits are seen by every state sharing the slot.

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Shared cell holding one top-level value.
#[derive(Clone, Default)]
pub struct Slot(Arc<RwLock<Value>>);

impl Slot {
    pub fn new(value: Value) -> Self {
        Slot(Arc::new(RwLock::new(value)))
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> Value {
        self.0.read().clone()
    }

    /// Edit a nested object in place. Visible to every state sharing this
    /// slot. Returns `None` when the value is not an object.
    pub fn edit_object<R>(&self, f: impl FnOnce(&mut Map<String, Value>) -> R) -> Option<R> {
        match &mut *self.0.write() {
            Value::Object(map) => Some(f(map)),
            _ => None,
        }
    }

    /// Edit a nested array in place. Returns `None` when the value is not an
    /// array.
    pub fn edit_array<R>(&self, f: impl FnOnce(&mut Vec<Value>) -> R) -> Option<R> {
        match &mut *self.0.write() {
            Value::Array(items) => Some(f(items)),
            _ => None,
        }
    }

    /// Run `f` against the value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&*self.0.read())
    }

    /// True when both slots are the same shared cell.
    pub fn ptr_eq(&self, other: &Slot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Slot::new(value)
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.read() == *other.0.read()
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0.read(), f)
    }
}

/// Top-level state mapping.
#[derive(Clone, Default, PartialEq)]
pub struct State {
    entries: HashMap<String, Slot>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from a JSON object. Returns `None` for any other value.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(map.into_iter().collect()),
            _ => None,
        }
    }

    /// Build a state from anything that serializes to a JSON object.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Option<Self>, serde_json::Error> {
        Ok(Self::from_value(serde_json::to_value(value)?))
    }

    /// Render the state as a JSON object (values are snapshotted).
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, slot)| (k.clone(), slot.get()))
            .collect();
        Value::Object(map)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(Slot::get)
    }

    pub fn slot(&self, key: &str) -> Option<&Slot> {
        self.entries.get(key)
    }

    /// Insert a value under `key` in a fresh slot.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Slot> {
        self.entries.insert(key.into(), Slot::new(value.into()))
    }

    pub fn insert_slot(&mut self, key: impl Into<String>, slot: Slot) -> Option<Slot> {
        self.entries.insert(key.into(), slot)
    }

    pub fn remove(&mut self, key: &str) -> Option<Slot> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shallow merge: every key of `other` replaces the same key of `self`;
    /// keys only in `self` are kept. Nested values are never combined.
    pub fn merged_with(&self, other: State) -> State {
        let mut merged = self.clone();
        merged.extend(other);
        merged
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl FromIterator<(String, Value)> for State {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        State {
            entries: iter.into_iter().map(|(k, v)| (k, Slot::new(v))).collect(),
        }
    }
}

impl FromIterator<(String, Slot)> for State {
    fn from_iter<I: IntoIterator<Item = (String, Slot)>>(iter: I) -> Self {
        State {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Slot)> for State {
    fn extend<I: IntoIterator<Item = (String, Slot)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for State {
    type Item = (String, Slot);
    type IntoIter = std::collections::hash_map::IntoIter<String, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Payload delivered to subscribers after a top-level commit.
#[derive(Debug, Clone)]
pub struct Change {
    pub old: State,
    pub new: State,
}
