//! # Stock Core Subsystem
//!
//! The state-mutation / audit / notification core of the stock ledger.
//!
//! ## Purpose
//!
//! Accepts validated mutation intents over goods, shares, and capacity
//! overrides; derives the storage-bin view from primary data on demand;
//! records every accepted mutation in a bounded, newest-first audit
//! history; fans each mutation out to live observers; and rewrites a
//! single JSON snapshot document after every accepted mutation.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Good ids unique, including across renames | `domain/store.rs` - `create_good()` / `update_good()` |
//! | Rejected mutations touch nothing | `service/mod.rs` - validation precedes audit/publish/save |
//! | Audit history capped, oldest-first eviction | `domain/audit.rs` - `append()` |
//! | Bin `used` always equals the live stock sum | `domain/bins.rs` - recomputed per read, no cache |
//! | Snapshot never observed half-written | `adapters/snapshot/file.rs` - temp write + rename |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/ - Snapshot store implementations (file, memory)      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - InventoryApi trait                         │
//! │  ports/outbound.rs - SnapshotStore trait                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/store.rs  - StateStore (goods, shares, capacities)      │
//! │  domain/bins.rs   - derived storage-bin view                    │
//! │  domain/audit.rs  - bounded newest-first history + queries      │
//! │  domain/search.rs - global substring search                     │
//! │  domain/seed.rs   - bootstrap dataset                           │
//! │  domain/errors.rs - InventoryError enum                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service layer (`service/`) wires the inner layer to the bus and
//! the snapshot port, serializing each mutation's full
//! validate → apply → audit → broadcast → persist sequence.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FileSnapshotStore, InMemorySnapshotStore};
pub use domain::audit::{AuditLog, AuditQuery, AUDIT_CAP};
pub use domain::bins::{compute_bins, top_utilized};
pub use domain::errors::InventoryError;
pub use domain::search::SearchResults;
pub use domain::store::StateStore;
pub use ports::inbound::InventoryApi;
pub use ports::outbound::{SnapshotError, SnapshotStore};
pub use service::InventoryService;
