//! Inner-layer domain logic: the state store, derived views, audit
//! history, search, seed data, and error types.

pub mod audit;
pub mod bins;
pub mod errors;
pub mod search;
pub mod seed;
pub mod store;
