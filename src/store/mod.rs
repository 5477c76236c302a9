//! State Store
//!
//! Holds the canonical state mapping. Writes go through [`Store::commit`],
//! which runs a handler against a shallow copy, shallow-merges its result
//! over that copy, installs the merged map, and notifies subscribers.
//! [`Store::module`] hands out a silent, key-scoped writer.

pub mod module;

pub use module::Module;

use crate::error::LookupError;
use crate::observer::Observers;
use crate::path::resolve;
use crate::types::{Change, State};
use parking_lot::{ReentrantMutex, RwLock};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

pub struct Store {
    state: RwLock<State>,
    observers: Observers,
    /// Serializes read-transform-install cycles. Re-entrant so handlers and
    /// subscribers may commit again from the same thread.
    commit_guard: ReentrantMutex<()>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a store with an empty state.
    pub fn new() -> Self {
        Self::with_state(State::new())
    }

    pub fn with_state(state: State) -> Self {
        Store {
            state: RwLock::new(state),
            observers: Observers::new(),
            commit_guard: ReentrantMutex::new(()),
        }
    }

    /// Shallow copy of the current state.
    pub fn get_state(&self) -> State {
        self.state.read().clone()
    }

    /// Look up the value at a dotted path.
    ///
    /// `Ok(None)` means only the final segment was absent. Any missing or
    /// non-mapping intermediate segment is an error.
    pub fn get_state_at(&self, path: &str) -> Result<Option<Value>, LookupError> {
        let state = self.get_state();
        resolve(&state, path).map_err(|err| {
            debug!(path, error = %err, "State lookup failed");
            err
        })
    }

    /// Look up a dotted path and deserialize the value found there.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, LookupError> {
        let Some(value) = self.get_state_at(path)? else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| LookupError::Deserialize {
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    /// Transform the state and notify subscribers.
    ///
    /// `handler` sees a shallow copy of the current state and returns a full
    /// or partial state; its keys overwrite the current top-level keys.
    /// Returns the merged state.
    pub fn commit<F>(&self, handler: F) -> State
    where
        F: FnOnce(&State) -> State,
    {
        match self.try_commit(|state| Ok::<_, Infallible>(handler(state))) {
            Ok(merged) => merged,
            Err(never) => match never {},
        }
    }

    /// Fallible [`commit`](Self::commit).
    ///
    /// If `handler` returns `Err`, the error is passed through untouched, the
    /// state is left as it was, and no subscriber runs.
    pub fn try_commit<F, E>(&self, handler: F) -> Result<State, E>
    where
        F: FnOnce(&State) -> Result<State, E>,
    {
        let _guard = self.commit_guard.lock();

        let old_state = self.get_state();
        let new_state = handler(&old_state)?;
        let changed_keys = new_state.len();
        let merged = old_state.merged_with(new_state);

        self.replace(merged.clone());
        debug!(
            changed_keys,
            total_keys = merged.len(),
            subscribers = self.observers.len(),
            "Committed state"
        );

        self.observers.notify(&Change {
            old: old_state,
            new: merged.clone(),
        });

        Ok(merged)
    }

    /// Writer scoped to one top-level key. Its commits do not notify.
    pub fn module(&self, key: impl Into<String>) -> Module<'_> {
        Module::new(self, key.into())
    }

    /// Register a callback for every future [`commit`](Self::commit).
    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&Change) + Send + Sync + 'static,
    {
        self.observers.subscribe(Arc::new(handler));
        trace!(subscribers = self.observers.len(), "Subscriber registered");
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    fn replace(&self, state: State) {
        *self.state.write() = state;
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.state.read())
            .field("subscribers", &self.observers.len())
            .finish()
    }
}
