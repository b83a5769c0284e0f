//! Middle-layer ports: the inbound API the transport layer consumes and
//! the outbound snapshot contract the adapters implement.

pub mod inbound;
pub mod outbound;
