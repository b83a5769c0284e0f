//! # Audit Publisher
//!
//! Defines the publishing side of the change broadcaster.

use crate::events::{BusMessage, EventFilter};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Trait for publishing accepted mutations to live observers.
///
/// Publish is fire-and-forget from the writer's perspective: it never
/// awaits acknowledgment from any observer, so write latency is
/// independent of the number or health of observers.
#[async_trait]
pub trait AuditPublisher: Send + Sync {
    /// Publish a message to every currently-registered observer.
    ///
    /// # Returns
    ///
    /// The number of active subscribers the message was handed to.
    async fn publish(&self, message: BusMessage) -> usize;

    /// Get the total number of messages published.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the change broadcaster.
///
/// Uses `tokio::sync::broadcast`, which snapshots the receiver set per
/// send and drops lagged receivers' oldest messages instead of blocking
/// the sender. Suitable for single-process operation; a distributed
/// deployment would use a different implementation.
pub struct InMemoryAuditBus {
    /// Broadcast sender for messages.
    sender: broadcast::Sender<BusMessage>,

    /// Total messages published.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryAuditBus {
    /// Create a new bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new bus with specified per-subscriber capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to messages matching a filter.
    ///
    /// The returned [`Subscription`] only observes messages published
    /// after this call; there is no history replay. Dropping the handle
    /// unsubscribes, and dropping it twice is impossible by construction,
    /// which makes unsubscribe idempotent.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let receiver = self.sender.subscribe();
        debug!(kinds = ?filter.kinds, "New subscription created");
        Subscription::new(receiver, filter)
    }

    /// Get a stream of messages matching a filter.
    ///
    /// This is a convenience method that returns an [`EventStream`].
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the per-subscriber channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryAuditBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditPublisher for InMemoryAuditBus {
    async fn publish(&self, message: BusMessage) -> usize {
        let kind = message.audit_kind();
        let action = message.entry().action;

        // Always increment counter (publish was attempted)
        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(message) {
            Ok(receiver_count) => {
                debug!(
                    kind = ?kind,
                    action = ?action,
                    receivers = receiver_count,
                    "Audit event published"
                );
                receiver_count
            }
            Err(e) => {
                // No receivers - the event is dropped, which is fine:
                // observers get no replay anyway.
                debug!(
                    kind = ?kind,
                    action = ?action,
                    error = %e,
                    "Audit event dropped (no receivers)"
                );
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
