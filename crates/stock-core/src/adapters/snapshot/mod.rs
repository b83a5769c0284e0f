//! Snapshot store implementations: a file-backed store for production
//! and an in-memory store for tests.

pub mod file;
pub mod memory;
