//! # Audit Log
//!
//! Append-only, capped history of accepted mutations, independent of
//! the store's current values.
//!
//! ## Invariants Enforced
//!
//! - Newest-first ordering: `append` prepends.
//! - Bounded size: past [`AUDIT_CAP`] entries, the oldest are evicted.
//! - No operation removes a specific entry by id.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};
use stock_types::{AuditAction, AuditEntry, AuditKind, EntitySnapshot};
use uuid::Uuid;

/// Maximum retained history length; eviction past this is strictly
/// oldest-first.
pub const AUDIT_CAP: usize = 500;

/// Default number of entries a query returns when no limit is given.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Largest limit a query may request.
pub const MAX_QUERY_LIMIT: usize = 100;

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Filters applied as an intersection over the live history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditQuery {
    /// Match entries of this kind.
    pub kind: Option<AuditKind>,
    /// Match entries with this action.
    pub action: Option<AuditAction>,
    /// Match entries whose before or after snapshot has this entity id.
    pub sku: Option<String>,
    /// Match entries attributed to this actor.
    pub user: Option<String>,
    /// Inclusive lower bound on `ts` (unix millis).
    pub from: Option<u64>,
    /// Inclusive upper bound on `ts` (unix millis).
    pub to: Option<u64>,
}

impl AuditQuery {
    fn matches(&self, entry: &AuditEntry) -> bool {
        if let Some(kind) = self.kind {
            if entry.kind != kind {
                return false;
            }
        }
        if let Some(action) = self.action {
            if entry.action != action {
                return false;
            }
        }
        if let Some(sku) = &self.sku {
            let hit = entry
                .before
                .as_ref()
                .is_some_and(|s| s.entity_id() == sku)
                || entry.after.as_ref().is_some_and(|s| s.entity_id() == sku);
            if !hit {
                return false;
            }
        }
        if let Some(user) = &self.user {
            if entry.user.as_deref() != Some(user.as_str()) {
                return false;
            }
        }
        if let Some(from) = self.from {
            if entry.ts < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if entry.ts > to {
                return false;
            }
        }
        true
    }
}

/// Bounded newest-first history of accepted mutations.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: VecDeque<AuditEntry>,
}

impl AuditLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a log from persisted entries (already newest-first),
    /// re-applying the cap in case the snapshot predates it.
    #[must_use]
    pub fn from_entries(entries: Vec<AuditEntry>) -> Self {
        let mut entries: VecDeque<AuditEntry> = entries.into();
        entries.truncate(AUDIT_CAP);
        Self { entries }
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The retained history, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter()
    }

    /// The retained history as an owned vector, newest first, for the
    /// snapshot document.
    #[must_use]
    pub fn to_vec(&self) -> Vec<AuditEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Records an accepted mutation: assigns a fresh id and timestamp,
    /// prepends, and evicts past the cap.
    pub fn append(
        &mut self,
        kind: AuditKind,
        action: AuditAction,
        user: Option<String>,
        before: Option<EntitySnapshot>,
        after: Option<EntitySnapshot>,
    ) -> AuditEntry {
        let hex = Uuid::new_v4().simple().to_string();
        let entry = AuditEntry {
            id: format!("aud_{}", &hex[..8]),
            ts: now_millis(),
            kind,
            action,
            user,
            before,
            after,
        };
        self.entries.push_front(entry.clone());
        self.entries.truncate(AUDIT_CAP);
        entry
    }

    /// Applies the query filters as an intersection over the history in
    /// its current (newest-first) order and returns the first `limit`
    /// hits. The limit defaults to [`DEFAULT_QUERY_LIMIT`] and is
    /// clamped to `[1, MAX_QUERY_LIMIT]`.
    #[must_use]
    pub fn query(&self, query: &AuditQuery, limit: Option<usize>) -> Vec<AuditEntry> {
        let limit = limit
            .unwrap_or(DEFAULT_QUERY_LIMIT)
            .clamp(1, MAX_QUERY_LIMIT);
        self.entries
            .iter()
            .filter(|e| query.matches(e))
            .take(limit)
            .cloned()
            .collect()
    }
}
