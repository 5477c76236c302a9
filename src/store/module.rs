//! Key-scoped writer over a [`Store`].

use super::Store;
use crate::types::State;
use serde_json::Value;
use std::convert::Infallible;
use tracing::debug;

/// Writes a single top-level key of its parent store.
///
/// Module commits replace the value at `key` with the handler's result and
/// leave every other key alone. They never notify subscribers, and the
/// handler receives the whole parent state rather than the value at `key`.
#[derive(Debug)]
pub struct Module<'a> {
    store: &'a Store,
    key: String,
}

impl<'a> Module<'a> {
    pub(super) fn new(store: &'a Store, key: String) -> Self {
        Module { store, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the value at this module's key. Returns the full merged state.
    pub fn commit<F>(&self, handler: F) -> State
    where
        F: FnOnce(&State) -> Value,
    {
        match self.try_commit(|state| Ok::<_, Infallible>(handler(state))) {
            Ok(merged) => merged,
            Err(never) => match never {},
        }
    }

    /// Fallible [`commit`](Self::commit); an `Err` leaves the store untouched.
    pub fn try_commit<F, E>(&self, handler: F) -> Result<State, E>
    where
        F: FnOnce(&State) -> Result<Value, E>,
    {
        let _guard = self.store.commit_guard.lock();

        let value = handler(&self.store.get_state())?;

        // Re-read: the handler may itself have committed.
        let mut merged = self.store.get_state();
        merged.insert(self.key.as_str(), value);

        self.store.replace(merged.clone());
        debug!(key = %self.key, total_keys = merged.len(), "Committed module state");

        Ok(merged)
    }
}
