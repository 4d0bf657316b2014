//! # Outbound Ports (Driven Ports)
//!
//! What the Custody State Machine requires from the ledger it runs on. The
//! key-value store port lives in `cl_01_evidence_store`.

use shared_types::Timestamp;
use thiserror::Error;

/// Per-transaction facts supplied by the ledger.
///
/// Caller identity is authenticated by the ledger; the state machine
/// records it but never checks it.
pub trait TransactionContext {
    /// Authenticated identity of the submitter.
    fn caller_identity(&self) -> &str;

    /// Organization of the submitter.
    fn caller_org(&self) -> &str;

    /// Id of the current transaction.
    fn transaction_id(&self) -> &str;

    /// Time the transaction commits at. Constant within a transaction.
    fn commit_timestamp(&self) -> Timestamp;
}

/// Failure to hand a notification to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NotificationError {
    pub message: String,
}

/// Sink for notifications of the current transaction.
///
/// The ledger delivers emitted notifications only if the transaction
/// commits.
pub trait NotificationSink {
    fn emit(&mut self, name: &str, payload: Vec<u8>) -> Result<(), NotificationError>;
}
