//! # Custody Notifications
//!
//! The unit the bus carries: one named notification of one committed
//! transaction, with the affected record as payload.

use serde::{Deserialize, Serialize};
use shared_types::{EvidenceRecord, NotificationName};

/// A notification emitted by a committed custody transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyNotification {
    /// Notification name, e.g. `EvidenceCreated`.
    pub name: String,
    /// Transaction that produced it.
    pub transaction_id: String,
    /// Encoded payload. For every built-in notification this is the
    /// affected record in its ledger encoding.
    pub payload: Vec<u8>,
}

impl CustodyNotification {
    pub fn new(
        name: impl Into<String>,
        transaction_id: impl Into<String>,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            transaction_id: transaction_id.into(),
            payload,
        }
    }

    /// Get the topic for this notification (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self.name.parse::<NotificationName>() {
            Ok(NotificationName::EvidenceCreated) => EventTopic::Registration,
            Ok(NotificationName::CustodyTransferred) => EventTopic::Custody,
            Ok(NotificationName::EvidenceArchived | NotificationName::EvidenceReactivated) => {
                EventTopic::Lifecycle
            }
            Ok(NotificationName::EvidenceInvalidated) => EventTopic::Integrity,
            Err(_) => EventTopic::Unclassified,
        }
    }

    /// Decode the payload as an evidence record.
    pub fn record(&self) -> Result<EvidenceRecord, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}

/// Notification topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// New evidence registered.
    Registration,
    /// Custodian changed.
    Custody,
    /// Archived to or reactivated from cold storage.
    Lifecycle,
    /// Evidence invalidated.
    Integrity,
    /// Names this bus does not know.
    Unclassified,
    /// All notifications (no filtering).
    All,
}

/// Filter for subscribing to specific notifications.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all notifications.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if a notification matches this filter.
    #[must_use]
    pub fn matches(&self, event: &CustodyNotification) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
