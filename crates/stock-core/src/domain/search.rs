//! # Global Search
//!
//! Case-insensitive substring search over goods (id, name, location)
//! and derived bins (id), each side capped at a fixed result count.

use serde::Serialize;
use stock_types::{Good, StorageBin};

/// Maximum results returned per collection.
pub const SEARCH_RESULT_CAP: usize = 20;

/// Matches from one search pass over goods and bins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub goods: Vec<Good>,
    pub bins: Vec<StorageBin>,
}

/// Run a substring search over the given collections.
#[must_use]
pub fn search(goods: &[Good], bins: &[StorageBin], query: &str) -> SearchResults {
    let needle = query.to_lowercase();

    let goods = goods
        .iter()
        .filter(|g| {
            g.id.to_lowercase().contains(&needle)
                || g.name.to_lowercase().contains(&needle)
                || g.location.to_lowercase().contains(&needle)
        })
        .take(SEARCH_RESULT_CAP)
        .cloned()
        .collect();

    let bins = bins
        .iter()
        .filter(|b| b.id.to_lowercase().contains(&needle))
        .take(SEARCH_RESULT_CAP)
        .cloned()
        .collect();

    SearchResults { goods, bins }
}
