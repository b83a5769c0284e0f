//! # State Store
//!
//! Sole writer of goods, shares, and capacity overrides. Every mutation
//! validates its full precondition set before touching any collection,
//! so a rejection leaves the store exactly as it was.
//!
//! ## Invariants Enforced
//!
//! - Good ids are unique across the live collection at all times; a
//!   rename re-validates uniqueness against the new id before commit.
//! - Names are never empty; capacities are strictly positive.
//! - Insertion order of goods and shares is preserved, which keeps the
//!   derived bin ordering stable.

use super::errors::InventoryError;
use std::collections::BTreeMap;
use stock_types::{CapacitySnapshot, CreateGood, CreateShare, Good, GoodPatch, Share};
use uuid::Uuid;

/// Generate a short prefixed identifier, e.g. `sh_4fa3b2c1`.
fn short_id(prefix: &str, len: usize) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}{}", &hex[..len])
}

/// The authoritative collections: goods, shares, and per-location
/// capacity overrides.
///
/// Purely in-memory and synchronous; the service layer owns locking,
/// audit, broadcast, and persistence around it.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    goods: Vec<Good>,
    shares: Vec<Share>,
    capacities: BTreeMap<String, u64>,
}

impl StateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from previously persisted collections.
    #[must_use]
    pub fn from_parts(goods: Vec<Good>, shares: Vec<Share>, capacities: BTreeMap<String, u64>) -> Self {
        Self {
            goods,
            shares,
            capacities,
        }
    }

    /// The live goods collection, in insertion order.
    #[must_use]
    pub fn goods(&self) -> &[Good] {
        &self.goods
    }

    /// The live shares collection, in insertion order.
    #[must_use]
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    /// The capacity overrides by location.
    #[must_use]
    pub fn capacities(&self) -> &BTreeMap<String, u64> {
        &self.capacities
    }

    fn good_index(&self, id: &str) -> Option<usize> {
        self.goods.iter().position(|g| g.id == id)
    }

    /// Inserts a new good.
    ///
    /// # Errors
    /// - `Validation` if `id` or `name` is empty
    /// - `Conflict` if the id is already taken
    pub fn create_good(&mut self, input: CreateGood) -> Result<Good, InventoryError> {
        if input.id.trim().is_empty() {
            return Err(InventoryError::Validation {
                field: "id",
                reason: "must not be empty",
            });
        }
        if input.name.trim().is_empty() {
            return Err(InventoryError::Validation {
                field: "name",
                reason: "must not be empty",
            });
        }
        if self.good_index(&input.id).is_some() {
            return Err(InventoryError::Conflict { id: input.id });
        }

        let record = Good {
            id: input.id,
            name: input.name,
            stock: input.stock.unwrap_or(0),
            location: input.location.unwrap_or_default(),
        };
        self.goods.push(record.clone());
        Ok(record)
    }

    /// Merges a patch over an existing good, applying a rename when the
    /// patch carries a different id.
    ///
    /// Returns the before and after snapshots; the audit log needs both.
    ///
    /// # Errors
    /// - `NotFound` if no good has `id`
    /// - `Conflict` if a rename collides with another good
    /// - `Validation` if the patch blanks the id or name
    pub fn update_good(
        &mut self,
        id: &str,
        patch: GoodPatch,
    ) -> Result<(Good, Good), InventoryError> {
        let index = self
            .good_index(id)
            .ok_or_else(|| InventoryError::NotFound { id: id.to_string() })?;

        // Validate the whole patch before committing anything.
        if let Some(new_id) = &patch.id {
            if new_id.trim().is_empty() {
                return Err(InventoryError::Validation {
                    field: "id",
                    reason: "must not be empty",
                });
            }
            if new_id != id && self.good_index(new_id).is_some() {
                return Err(InventoryError::Conflict { id: new_id.clone() });
            }
        }
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(InventoryError::Validation {
                    field: "name",
                    reason: "must not be empty",
                });
            }
        }

        let before = self.goods[index].clone();
        let mut next = before.clone();
        if let Some(new_id) = patch.id {
            next.id = new_id;
        }
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(stock) = patch.stock {
            next.stock = stock;
        }
        if let Some(location) = patch.location {
            next.location = location;
        }
        self.goods[index] = next.clone();
        Ok((before, next))
    }

    /// Removes a good, returning the removed snapshot.
    ///
    /// # Errors
    /// - `NotFound` if no good has `id`
    pub fn delete_good(&mut self, id: &str) -> Result<Good, InventoryError> {
        let index = self
            .good_index(id)
            .ok_or_else(|| InventoryError::NotFound { id: id.to_string() })?;
        Ok(self.goods.remove(index))
    }

    /// Upserts a capacity override for a location.
    ///
    /// # Errors
    /// - `Validation` if `capacity` is zero
    pub fn set_capacity(
        &mut self,
        location: &str,
        capacity: u64,
    ) -> Result<CapacitySnapshot, InventoryError> {
        if capacity == 0 {
            return Err(InventoryError::Validation {
                field: "capacity",
                reason: "must be a positive number",
            });
        }
        self.capacities.insert(location.to_string(), capacity);
        Ok(CapacitySnapshot {
            id: location.to_string(),
            capacity,
        })
    }

    /// Creates a share with a generated id and derived url.
    ///
    /// # Errors
    /// - `Validation` if `name` is empty
    pub fn create_share(&mut self, input: CreateShare) -> Result<Share, InventoryError> {
        if input.name.trim().is_empty() {
            return Err(InventoryError::Validation {
                field: "name",
                reason: "must not be empty",
            });
        }

        let id = short_id("sh_", 6);
        let record = Share {
            url: format!("/share/{id}"),
            id,
            name: input.name,
            scope: input.scope,
            access: "public".to_string(),
        };
        self.shares.push(record.clone());
        Ok(record)
    }

    /// Removes a share, returning the removed snapshot.
    ///
    /// # Errors
    /// - `NotFound` if no share has `id`
    pub fn delete_share(&mut self, id: &str) -> Result<Share, InventoryError> {
        let index = self
            .shares
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| InventoryError::NotFound { id: id.to_string() })?;
        Ok(self.shares.remove(index))
    }
}
