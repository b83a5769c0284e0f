//! # Bus Messages and Filters
//!
//! The message shape delivered to observers and the per-subscription
//! filter over audit kinds.

use serde::{Deserialize, Serialize};
use stock_types::{AuditEntry, AuditKind};

/// A message delivered to live observers, one per accepted mutation.
///
/// On the wire this is `{"kind": "AUDIT", "entry": {...}}`, matching
/// what a streaming transport (SSE, websocket) forwards verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BusMessage {
    #[serde(rename = "AUDIT")]
    Audit { entry: AuditEntry },
}

impl BusMessage {
    /// The audit entry carried by this message.
    #[must_use]
    pub fn entry(&self) -> &AuditEntry {
        match self {
            Self::Audit { entry } => entry,
        }
    }

    /// Which collection the carried entry concerns.
    #[must_use]
    pub fn audit_kind(&self) -> AuditKind {
        self.entry().kind
    }
}

/// Restricts a subscription to a subset of audit kinds.
///
/// An empty kind list means "everything", which is the contract a live
/// audit feed uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Kinds to deliver; empty delivers all.
    pub kinds: Vec<AuditKind>,
}

impl EventFilter {
    /// A filter that matches every message.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter that matches only the given kinds.
    #[must_use]
    pub fn kinds(kinds: Vec<AuditKind>) -> Self {
        Self { kinds }
    }

    /// Whether a message passes this filter.
    #[must_use]
    pub fn matches(&self, message: &BusMessage) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&message.audit_kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_types::AuditAction;

    fn message(kind: AuditKind) -> BusMessage {
        BusMessage::Audit {
            entry: AuditEntry {
                id: "aud_deadbeef".to_string(),
                ts: 1,
                kind,
                action: AuditAction::Create,
                user: None,
                before: None,
                after: None,
            },
        }
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(message(AuditKind::Goods)).unwrap();
        assert_eq!(value["kind"], "AUDIT");
        assert_eq!(value["entry"]["type"], "goods");
    }

    #[test]
    fn test_filter_all_matches_everything() {
        let filter = EventFilter::all();
        assert!(filter.matches(&message(AuditKind::Goods)));
        assert!(filter.matches(&message(AuditKind::Share)));
    }

    #[test]
    fn test_filter_by_kind() {
        let filter = EventFilter::kinds(vec![AuditKind::Share]);
        assert!(filter.matches(&message(AuditKind::Share)));
        assert!(!filter.matches(&message(AuditKind::Storage)));
    }
}
