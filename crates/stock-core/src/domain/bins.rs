//! # Derived Storage-Bin View
//!
//! Computes the bin view from the live goods collection and capacity
//! overrides on every call. There is no memoization: `used` always
//! equals the current stock sum, so no staleness window exists.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::HashMap;
use stock_types::{Good, StorageBin, DEFAULT_BIN_CAPACITY};

/// Group goods by non-empty location and sum their stock per group.
///
/// Bins appear in discovery order (the order their location first
/// occurs in the goods collection). A location with no goods is never
/// emitted, even when a capacity override exists for it.
#[must_use]
pub fn compute_bins(goods: &[Good], capacities: &BTreeMap<String, u64>) -> Vec<StorageBin> {
    let mut bins: Vec<StorageBin> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for good in goods {
        let location = good.location.trim();
        if location.is_empty() {
            continue;
        }
        match index.get(location) {
            Some(&i) => {
                bins[i].used = bins[i].used.saturating_add(good.stock);
            }
            None => {
                index.insert(location, bins.len());
                bins.push(StorageBin {
                    id: location.to_string(),
                    capacity: capacities
                        .get(location)
                        .copied()
                        .unwrap_or(DEFAULT_BIN_CAPACITY),
                    used: good.stock,
                });
            }
        }
    }

    bins
}

/// The `n` bins with the highest utilization (`used / capacity`),
/// descending. Ties keep discovery order (stable sort).
#[must_use]
pub fn top_utilized(mut bins: Vec<StorageBin>, n: usize) -> Vec<StorageBin> {
    bins.sort_by(|a, b| {
        b.utilization()
            .partial_cmp(&a.utilization())
            .unwrap_or(Ordering::Equal)
    });
    bins.truncate(n);
    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good(id: &str, stock: u64, location: &str) -> Good {
        Good {
            id: id.to_string(),
            name: format!("{id} name"),
            stock,
            location: location.to_string(),
        }
    }

    #[test]
    fn test_groups_by_location_and_sums_stock() {
        let goods = vec![
            good("SKU-1", 10, "A-1"),
            good("SKU-2", 5, "B-2"),
            good("SKU-3", 7, "A-1"),
        ];
        let bins = compute_bins(&goods, &BTreeMap::new());

        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].id, "A-1");
        assert_eq!(bins[0].used, 17);
        assert_eq!(bins[0].capacity, DEFAULT_BIN_CAPACITY);
        assert_eq!(bins[1].id, "B-2");
        assert_eq!(bins[1].used, 5);
    }

    #[test]
    fn test_unplaced_goods_excluded() {
        let goods = vec![good("SKU-1", 10, ""), good("SKU-2", 3, "  ")];
        let bins = compute_bins(&goods, &BTreeMap::new());
        assert!(bins.is_empty());
    }

    #[test]
    fn test_override_capacity_applied() {
        let goods = vec![good("SKU-1", 50, "D-1")];
        let mut capacities = BTreeMap::new();
        capacities.insert("D-1".to_string(), 40);

        let bins = compute_bins(&goods, &capacities);
        assert_eq!(bins[0].capacity, 40);
        // Over-capacity is representable, not clamped
        assert_eq!(bins[0].used, 50);
    }

    #[test]
    fn test_override_without_goods_emits_nothing() {
        let mut capacities = BTreeMap::new();
        capacities.insert("Z-9".to_string(), 75);
        let bins = compute_bins(&[], &capacities);
        assert!(bins.is_empty());
    }

    #[test]
    fn test_top_utilized_orders_by_ratio() {
        let goods = vec![
            good("SKU-1", 50, "A-1"),  // 50%
            good("SKU-2", 90, "B-2"),  // 90%
            good("SKU-3", 10, "C-3"),  // 10%
        ];
        let bins = compute_bins(&goods, &BTreeMap::new());
        let top = top_utilized(bins, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "B-2");
        assert_eq!(top[1].id, "A-1");
    }

    #[test]
    fn test_top_utilized_ties_keep_discovery_order() {
        let goods = vec![
            good("SKU-1", 30, "A-1"),
            good("SKU-2", 30, "B-2"),
            good("SKU-3", 30, "C-3"),
        ];
        let bins = compute_bins(&goods, &BTreeMap::new());
        let top = top_utilized(bins, 3);

        let ids: Vec<&str> = top.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["A-1", "B-2", "C-3"]);
    }
}
