//! Outer-layer adapters implementing the snapshot port.

pub mod snapshot;

pub use snapshot::file::FileSnapshotStore;
pub use snapshot::memory::InMemorySnapshotStore;
