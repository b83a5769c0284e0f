//! # Inbound Port: Inventory API
//!
//! The contract the (out-of-scope) transport layer consumes. Mutation
//! intents arrive as plain validated structures; reads return owned
//! snapshots so the caller never holds a lock.

use crate::domain::audit::AuditQuery;
use crate::domain::errors::InventoryError;
use crate::domain::search::SearchResults;
use async_trait::async_trait;
use stock_types::{AuditEntry, Good, Mutation, Share, StorageBin};

/// The inventory core as seen by its consumers.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Apply one mutation intent.
    ///
    /// On success the mutation has been committed, audited, broadcast,
    /// and persisted; the returned audit entry carries the before/after
    /// snapshots. A validation, conflict, or not-found rejection leaves
    /// every collaborator untouched.
    ///
    /// # Errors
    ///
    /// See [`InventoryError`]; `Persistence` means the in-memory commit
    /// succeeded but the snapshot write did not.
    async fn apply(&self, mutation: Mutation) -> Result<AuditEntry, InventoryError>;

    /// The live goods collection.
    fn list_goods(&self) -> Vec<Good>;

    /// The derived bin view, recomputed from current goods.
    fn list_bins(&self) -> Vec<StorageBin>;

    /// The `n` most utilized bins, ties stable.
    fn top_bins(&self, n: usize) -> Vec<StorageBin>;

    /// The live shares collection.
    fn list_shares(&self) -> Vec<Share>;

    /// Filtered audit history, newest first.
    fn query_audit(&self, query: &AuditQuery, limit: Option<usize>) -> Vec<AuditEntry>;

    /// Case-insensitive substring search over goods and bins.
    fn search(&self, query: &str) -> SearchResults;
}
