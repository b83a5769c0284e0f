//! # Stock Types
//!
//! Domain entities and mutation intents shared across the stock-ledger
//! subsystems.
//!
//! ## Clusters
//!
//! - **Catalog**: [`Good`], [`Share`], [`StorageBin`]
//! - **History**: [`AuditEntry`], [`AuditKind`], [`AuditAction`], [`EntitySnapshot`]
//! - **Persistence**: [`SnapshotDoc`]
//! - **Intents**: [`Mutation`] and the per-kind input structs

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod entities;
pub mod mutation;

pub use entities::{
    AuditAction, AuditEntry, AuditKind, CapacitySnapshot, EntitySnapshot, Good, Share,
    SnapshotDoc, StorageBin, DEFAULT_BIN_CAPACITY,
};
pub use mutation::{CreateGood, CreateShare, GoodPatch, Mutation};
