//! Inventory error types.
//!
//! All three rejection kinds are checked before any state change, audit
//! append, broadcast, or snapshot write. `Persistence` is the one
//! exception: it surfaces after the in-memory commit when the snapshot
//! write fails (see the service layer).

use crate::ports::outbound::SnapshotError;
use thiserror::Error;

/// Inventory error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A required field is missing, empty, or malformed.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// A create or rename would duplicate an existing unique id.
    #[error("duplicate id: {id}")]
    Conflict { id: String },

    /// The targeted entity does not exist.
    #[error("not found: {id}")]
    NotFound { id: String },

    /// The snapshot write failed after the in-memory state changed.
    ///
    /// Memory and disk may diverge until the next successful save; the
    /// caller is told rather than the failure being swallowed.
    #[error("snapshot persistence failed: {0}")]
    Persistence(#[from] SnapshotError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_names_field() {
        let err = InventoryError::Validation {
            field: "name",
            reason: "must not be empty",
        };
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("empty"));
    }

    #[test]
    fn test_conflict_display() {
        let err = InventoryError::Conflict {
            id: "SKU-AX12".to_string(),
        };
        assert!(err.to_string().contains("SKU-AX12"));
    }

    #[test]
    fn test_persistence_wraps_snapshot_error() {
        let err: InventoryError = SnapshotError::Io {
            message: "disk full".to_string(),
        }
        .into();
        assert!(err.to_string().contains("disk full"));
    }
}
