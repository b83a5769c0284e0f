//! # Outbound Port: Snapshot Store
//!
//! The durability contract. The whole document is rewritten on every
//! accepted mutation (write-heavy, read-rare), and a concurrent reader
//! must never observe a half-written file.

use stock_types::SnapshotDoc;
use thiserror::Error;

/// Snapshot store errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// I/O failure while writing (disk full, permission denied, ...).
    #[error("snapshot i/o error: {message}")]
    Io { message: String },

    /// The document could not be encoded.
    #[error("snapshot encode error: {message}")]
    Encode { message: String },
}

/// Durable writer/reader for the combined state + audit document.
pub trait SnapshotStore: Send + Sync {
    /// Read the persisted snapshot.
    ///
    /// Returns `None` when no usable snapshot exists (missing file or
    /// parse failure); the caller falls back to the seed dataset. This
    /// is a non-fatal bootstrap path, not an error.
    fn load(&self) -> Option<SnapshotDoc>;

    /// Atomically replace the persisted snapshot with `doc`.
    ///
    /// # Errors
    ///
    /// Any failure is surfaced; the caller reports it as a persistence
    /// error rather than swallowing the memory/disk divergence.
    fn save(&self, doc: &SnapshotDoc) -> Result<(), SnapshotError>;
}
