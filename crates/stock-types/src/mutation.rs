//! # Mutation Intents
//!
//! One strict schema per mutation kind. The HTTP (or other) boundary
//! parses request bodies into these before anything reaches the state
//! store, so the store never sees untyped payloads.

use serde::{Deserialize, Serialize};

/// Input for creating a good. `stock` and `location` are optional and
/// default to `0` and `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGood {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A partial overwrite of an existing good. `Some` fields replace the
/// stored value, `None` fields are kept. Setting `id` renames the good,
/// subject to uniqueness against the new id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Input for creating a share. The id and url are generated by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShare {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// A validated mutation intent, one variant per operation the state
/// store accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    CreateGood(CreateGood),
    UpdateGood { id: String, patch: GoodPatch },
    DeleteGood { id: String },
    SetCapacity { location: String, capacity: u64 },
    CreateShare(CreateShare),
    DeleteShare { id: String },
}
