//! Shared helpers for integration tests.

use parking_lot::Mutex;
use serde_json::Value;
use shallow_store::{Change, State, Store};
use std::sync::Arc;

pub fn state(value: Value) -> State {
    State::from_value(value).expect("fixture must be a JSON object")
}

pub fn store(value: Value) -> Store {
    Store::with_state(state(value))
}

/// Records every change delivered to a subscriber as `(old, new)` JSON pairs.
#[derive(Clone, Default)]
pub struct ChangeLog {
    entries: Arc<Mutex<Vec<(Value, Value)>>>,
}

impl ChangeLog {
    pub fn attach(&self, store: &Store) {
        let entries = Arc::clone(&self.entries);
        store.subscribe(move |change: &Change| {
            entries
                .lock()
                .push((change.old.to_value(), change.new.to_value()));
        });
    }

    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
