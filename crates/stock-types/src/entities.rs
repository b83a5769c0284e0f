//! # Core Domain Entities
//!
//! Defines the entities owned by the state store plus the derived and
//! historical shapes they produce.
//!
//! ## Clusters
//!
//! - **Catalog**: `Good`, `Share`
//! - **Derived**: `StorageBin` (recomputed, never persisted)
//! - **History**: `AuditEntry` with typed before/after snapshots
//! - **Persistence**: `SnapshotDoc`, the single rewritten document

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Capacity assumed for a storage bin with no explicit override.
pub const DEFAULT_BIN_CAPACITY: u64 = 100;

/// A catalog entry (SKU). The `id` is the natural key; renaming a good
/// changes this key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Good {
    /// Globally unique identifier, e.g. `SKU-AX12`.
    pub id: String,
    /// Human-readable name, never empty.
    pub name: String,
    /// Units on hand.
    #[serde(default)]
    pub stock: u64,
    /// Storage location; empty string means "unplaced".
    #[serde(default)]
    pub location: String,
}

/// A named, URL-addressable read-only view definition.
///
/// Immutable once created except for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// Generated identifier with `sh_` prefix.
    pub id: String,
    /// Display name, never empty.
    pub name: String,
    /// Optional free-text description of what the share covers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Derived path: `/share/{id}`.
    pub url: String,
    /// Access level; always `"public"` in this core.
    pub access: String,
}

/// A derived storage-capacity view keyed by location.
///
/// Never stored; recomputed from the live goods collection on every read,
/// so `used` has no staleness window. Over-capacity (`used > capacity`)
/// is representable and not clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBin {
    /// The location string this bin aggregates.
    pub id: String,
    /// Override capacity, or [`DEFAULT_BIN_CAPACITY`] when absent.
    pub capacity: u64,
    /// Sum of stock of all goods at this location.
    pub used: u64,
}

impl StorageBin {
    /// Fraction of capacity in use. Capacity is validated positive at
    /// the mutation boundary, so this never divides by zero.
    #[must_use]
    pub fn utilization(&self) -> f64 {
        self.used as f64 / self.capacity.max(1) as f64
    }
}

/// Which collection an audit entry concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditKind {
    Goods,
    Storage,
    Share,
}

/// What was done to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Capacity,
}

/// The shape a capacity override takes inside an audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    /// The location the override applies to.
    pub id: String,
    /// The new positive capacity.
    pub capacity: u64,
}

/// A before/after entity snapshot inside an audit entry.
///
/// Untagged on the wire so the persisted document keeps the plain object
/// shapes of each entity. Variant order matters for deserialization:
/// `Share` requires `url`/`access`, `Good` requires `name`, and the
/// capacity shape has neither, so each candidate is unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntitySnapshot {
    Share(Share),
    Good(Good),
    Capacity(CapacitySnapshot),
}

impl EntitySnapshot {
    /// The natural key of the snapshotted entity.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        match self {
            Self::Share(share) => &share.id,
            Self::Good(good) => &good.id,
            Self::Capacity(cap) => &cap.id,
        }
    }
}

/// An immutable record of one accepted mutation.
///
/// Once appended, an entry is never modified; the only way it leaves the
/// log is oldest-first eviction past the retention cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Generated identifier with `aud_` prefix.
    pub id: String,
    /// Unix timestamp in milliseconds when the mutation was accepted.
    pub ts: u64,
    /// Which collection was touched.
    #[serde(rename = "type")]
    pub kind: AuditKind,
    /// What was done.
    pub action: AuditAction,
    /// Actor attribution, when the caller supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Entity state before the mutation (absent for creates).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<EntitySnapshot>,
    /// Entity state after the mutation (absent for deletes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<EntitySnapshot>,
}

/// The persisted snapshot document: the full store plus the audit
/// history, rewritten as one atomic unit on every accepted mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDoc {
    #[serde(default)]
    pub goods: Vec<Good>,
    #[serde(default)]
    pub shares: Vec<Share>,
    #[serde(default)]
    pub capacities: BTreeMap<String, u64>,
    #[serde(default)]
    pub audit: Vec<AuditEntry>,
}
