//! # Adapters
//!
//! Plain implementations of the outbound ports, used by the ledger runtime
//! to hand per-transaction facts in and collect notifications out.

use shared_types::Timestamp;

use crate::ports::outbound::{NotificationError, NotificationSink, TransactionContext};

/// Transaction context with fixed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTransactionContext {
    pub caller_identity: String,
    pub caller_org: String,
    pub transaction_id: String,
    pub commit_timestamp: Timestamp,
}

impl StaticTransactionContext {
    pub fn new(
        caller_identity: impl Into<String>,
        caller_org: impl Into<String>,
        transaction_id: impl Into<String>,
        commit_timestamp: Timestamp,
    ) -> Self {
        Self {
            caller_identity: caller_identity.into(),
            caller_org: caller_org.into(),
            transaction_id: transaction_id.into(),
            commit_timestamp,
        }
    }
}

impl TransactionContext for StaticTransactionContext {
    fn caller_identity(&self) -> &str {
        &self.caller_identity
    }

    fn caller_org(&self) -> &str {
        &self.caller_org
    }

    fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    fn commit_timestamp(&self) -> Timestamp {
        self.commit_timestamp
    }
}

/// A notification held until its transaction commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNotification {
    pub name: String,
    pub payload: Vec<u8>,
}

/// Sink that buffers notifications in emission order.
#[derive(Debug, Default)]
pub struct BufferedNotificationSink {
    pending: Vec<PendingNotification>,
}

impl BufferedNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[PendingNotification] {
        &self.pending
    }

    pub fn into_pending(self) -> Vec<PendingNotification> {
        self.pending
    }
}

impl NotificationSink for BufferedNotificationSink {
    fn emit(&mut self, name: &str, payload: Vec<u8>) -> Result<(), NotificationError> {
        self.pending.push(PendingNotification {
            name: name.to_string(),
            payload,
        });
        Ok(())
    }
}
