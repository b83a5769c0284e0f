//! # Stock Bus - Change Broadcaster
//!
//! Fans every accepted mutation out to any number of live observers
//! without blocking the writer.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ StateStore   │                    │ Observer     │
//! │ (writer)     │    publish()       │ (SSE, CLI..) │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Audit Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Delivery contract
//!
//! - Every observer registered at publish time receives the message, in
//!   publish order.
//! - No history replay: a new subscriber only sees mutations that occur
//!   after it subscribes.
//! - Publish is fire-and-forget; a slow, lagged, or dropped observer
//!   never blocks the writer or other observers.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{BusMessage, EventFilter};
pub use publisher::{AuditPublisher, InMemoryAuditBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events buffered per subscriber before the oldest are dropped
/// for that subscriber (the writer is never blocked).
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
