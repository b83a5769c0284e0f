//! # Bootstrap Dataset
//!
//! The fixed seed the engine starts from when no snapshot can be
//! loaded. Starting with some valid state is part of the persistence
//! contract: a missing or corrupt snapshot is a non-fatal condition.

use stock_types::{Good, Share, SnapshotDoc};

/// The seed snapshot: three placed goods, one public share, no capacity
/// overrides, empty audit history.
#[must_use]
pub fn seed_snapshot() -> SnapshotDoc {
    SnapshotDoc {
        goods: vec![
            Good {
                id: "SKU-AX12".to_string(),
                name: "Alloy Widget 12".to_string(),
                stock: 120,
                location: "A-14".to_string(),
            },
            Good {
                id: "SKU-BX03".to_string(),
                name: "Bolt Pack 03".to_string(),
                stock: 64,
                location: "B-9".to_string(),
            },
            Good {
                id: "SKU-CT90".to_string(),
                name: "Cable Tie 90".to_string(),
                stock: 240,
                location: "C-11".to_string(),
            },
        ],
        shares: vec![Share {
            id: "sh_abc1".to_string(),
            name: "Vendor Inventory 1".to_string(),
            scope: Some("SKUs A*, stock levels".to_string()),
            url: "/share/sh_abc1".to_string(),
            access: "public".to_string(),
        }],
        capacities: Default::default(),
        audit: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let doc = seed_snapshot();
        assert_eq!(doc.goods.len(), 3);
        assert_eq!(doc.shares.len(), 1);
        assert!(doc.capacities.is_empty());
        assert!(doc.audit.is_empty());
    }

    #[test]
    fn test_seed_ids_unique() {
        let doc = seed_snapshot();
        let mut ids: Vec<&str> = doc.goods.iter().map(|g| g.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
