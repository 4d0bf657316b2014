//! # Event Publisher
//!
//! Defines the publishing side of the notification bus.

use crate::events::{CustodyNotification, EventFilter};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Trait for publishing notifications to the bus.
pub trait EventPublisher: Send + Sync {
    /// Publish a notification to the bus.
    ///
    /// Returns the number of active subscribers that received it.
    fn publish(&self, event: CustodyNotification) -> usize;

    /// Get the total number of notifications published.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the notification bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer
/// semantics. A notification published with no subscribers is dropped.
pub struct InMemoryEventBus {
    /// Broadcast sender for notifications.
    sender: broadcast::Sender<CustodyNotification>,

    /// Total notifications published.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to notifications matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Get a stream of notifications matching a filter.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.sender.subscribe(), filter)
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: CustodyNotification) -> usize {
        let topic = event.topic();
        let name = event.name.clone();
        let tx_id = event.transaction_id.clone();

        // Always increment counter (notification was attempted)
        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    topic = ?topic,
                    name = %name,
                    tx_id = %tx_id,
                    receivers = receiver_count,
                    "Notification published"
                );
                receiver_count
            }
            Err(_) => {
                debug!(
                    topic = ?topic,
                    name = %name,
                    tx_id = %tx_id,
                    "Notification dropped (no receivers)"
                );
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventTopic;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::{self, Layer, SubscriberExt};

    fn created() -> CustodyNotification {
        CustodyNotification::new("EvidenceCreated", "tx-1", Vec::new())
    }

    #[test]
    fn test_publish_no_subscribers() {
        let bus = InMemoryEventBus::new();

        let receivers = bus.publish(created());
        assert_eq!(receivers, 0);
        assert_eq!(bus.events_published(), 1);
    }

    /// Records the level of every event.
    struct LevelRecorder(Arc<Mutex<Vec<tracing::Level>>>);

    impl<S: tracing::Subscriber> Layer<S> for LevelRecorder {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: layer::Context<'_, S>) {
            if let Ok(mut levels) = self.0.lock() {
                levels.push(*event.metadata().level());
            }
        }
    }

    #[test]
    fn test_unheard_publish_logs_at_debug() {
        let levels = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(LevelRecorder(levels.clone()));
        let bus = InMemoryEventBus::new();

        tracing::subscriber::with_default(subscriber, || {
            bus.publish(created());
            bus.publish(created());
        });

        let levels = levels.lock().unwrap();
        assert_eq!(levels.len(), 2);
        assert!(levels.iter().all(|level| *level == tracing::Level::DEBUG));
    }

    #[test]
    fn test_publish_with_subscriber() {
        let bus = InMemoryEventBus::new();

        // Create subscriber BEFORE publishing
        let _sub = bus.subscribe(EventFilter::all());

        assert_eq!(bus.publish(created()), 1);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_multiple_subscribers() {
        let bus = InMemoryEventBus::new();

        let _sub1 = bus.subscribe(EventFilter::all());
        let _sub2 = bus.subscribe(EventFilter::all());
        let _sub3 = bus.subscribe(EventFilter::topics(vec![EventTopic::Integrity]));

        // Broadcast reaches every receiver; filtering happens on receipt.
        assert_eq!(bus.publish(created()), 3);
    }

    #[test]
    fn test_default_bus() {
        let bus = InMemoryEventBus::default();
        assert_eq!(bus.capacity(), DEFAULT_CHANNEL_CAPACITY);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.events_published(), 0);
        assert_eq!(InMemoryEventBus::with_capacity(16).capacity(), 16);
    }
}
