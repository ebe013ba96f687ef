//! In-process event delivery.
//!
//! Publication is an explicit channel send owned by whoever constructs the
//! bus; there is no global dispatcher. Services receive the sink as a
//! trait object so they can be tested with a recording double.

use tokio::sync::broadcast;
use tracing::trace;

use super::DomainEvent;

/// Anything that accepts published domain events.
///
/// Publication is fire-and-forget: a send with no connected listeners is
/// not an error.
pub trait EventSink: Send + Sync + 'static {
    /// Publish a single event.
    fn publish(&self, event: DomainEvent);
}

/// Broadcast-channel event bus.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus retaining up to `capacity` undelivered events per
    /// subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all subsequently published events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl EventSink for EventBus {
    fn publish(&self, event: DomainEvent) {
        // Err means no subscribers are currently connected; the event is
        // simply dropped.
        if let Err(e) = self.tx.send(event) {
            trace!("Event published with no subscribers: {e}");
        }
    }
}
