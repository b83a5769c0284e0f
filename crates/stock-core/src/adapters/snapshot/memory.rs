//! In-memory snapshot store for tests.

use crate::ports::outbound::{SnapshotError, SnapshotStore};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use stock_types::SnapshotDoc;

/// Holds the last saved document in memory. Supports an injectable
/// failure mode so tests can exercise the persistence error path.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    doc: Mutex<Option<SnapshotDoc>>,
    fail_saves: AtomicBool,
    saves: AtomicU64,
}

impl InMemorySnapshotStore {
    /// Create an empty store (loads as `None`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a document.
    #[must_use]
    pub fn with_doc(doc: SnapshotDoc) -> Self {
        Self {
            doc: Mutex::new(Some(doc)),
            ..Self::default()
        }
    }

    /// Make every subsequent `save` fail with an I/O error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The last successfully saved document.
    #[must_use]
    pub fn saved(&self) -> Option<SnapshotDoc> {
        self.doc.lock().clone()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Option<SnapshotDoc> {
        self.doc.lock().clone()
    }

    fn save(&self, doc: &SnapshotDoc) -> Result<(), SnapshotError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(SnapshotError::Io {
                message: "injected failure".to_string(),
            });
        }
        *self.doc.lock() = Some(doc.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load().is_none());

        store.save(&SnapshotDoc::default()).expect("save");
        assert!(store.load().is_some());
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_injected_failure() {
        let store = InMemorySnapshotStore::new();
        store.set_fail_saves(true);

        let err = store.save(&SnapshotDoc::default()).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
        assert!(store.saved().is_none());
    }
}
