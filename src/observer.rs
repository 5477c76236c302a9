//! Ordered subscriber list.

use crate::types::Change;
use parking_lot::RwLock;
use std::sync::Arc;

/// Callback invoked after every top-level commit.
pub type Subscriber = Arc<dyn Fn(&Change) + Send + Sync>;

#[derive(Default)]
pub struct Observers {
    subscribers: RwLock<Vec<Subscriber>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Subscriber) {
        self.subscribers.write().push(handler);
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }

    /// Invoke every subscriber in registration order.
    ///
    /// The list is snapshotted first: handlers added while dispatching are
    /// not called for this change, and a handler may subscribe without
    /// deadlocking.
    pub fn notify(&self, change: &Change) {
        if self.is_empty() {
            return;
        }
        let snapshot: Vec<Subscriber> = self.subscribers.read().clone();
        for subscriber in &snapshot {
            subscriber(change);
        }
    }
}
