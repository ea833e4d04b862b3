//! Concurrency-safe collector for processed items.

use std::sync::{Mutex, PoisonError};

use rsitems_storage::StoredItem;

/// Collects the saved items produced by a batch run.
///
/// Worker tasks push concurrently; arrival order is whatever the scheduler
/// produces and callers must not read meaning into it. A task panicking
/// while holding the lock must not wedge the run, so the poison flag is
/// cleared on every access.
#[derive(Debug, Default)]
pub struct ProcessedItems {
    items: Mutex<Vec<StoredItem>>,
}

impl ProcessedItems {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one saved item.
    pub fn push(&self, item: StoredItem) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item);
    }

    /// Number of items collected so far.
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of everything gathered so far.
    pub fn snapshot(&self) -> Vec<StoredItem> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Consumes the collector and returns everything gathered.
    pub fn into_items(self) -> Vec<StoredItem> {
        self.items
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
