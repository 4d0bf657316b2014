//! Steps shared by the custody operations.

use cl_01_evidence_store::KeyValueStore;
use shared_types::{CustodyEvent, CustodyEventKind, EvidenceKey, EvidenceRecord, NotificationName};
use tracing::warn;

use super::CustodyService;
use crate::domain::errors::CustodyError;
use crate::domain::transitions::Transition;
use crate::domain::validation::evidence_key;
use crate::ports::outbound::{NotificationSink, TransactionContext};

impl<KV, TX, NS> CustodyService<KV, TX, NS>
where
    KV: KeyValueStore,
    TX: TransactionContext,
    NS: NotificationSink,
{
    /// Build an event stamped with the current transaction's facts.
    pub(crate) fn new_event(&self, kind: CustodyEventKind, description: String) -> CustodyEvent {
        CustodyEvent {
            timestamp: self.context.commit_timestamp(),
            event_kind: kind,
            actor: self.context.caller_identity().to_string(),
            actor_org: self.context.caller_org().to_string(),
            description,
            transaction_ref: self.context.transaction_id().to_string(),
        }
    }

    /// Read the record at `key` or fail with `NotFound`.
    pub(crate) fn load_existing(&self, key: &EvidenceKey) -> Result<EvidenceRecord, CustodyError> {
        self.store
            .get(key)?
            .ok_or_else(|| CustodyError::NotFound {
                key: key.to_string(),
            })
    }

    /// Load, check the transition and append its event.
    ///
    /// Nothing is written; the caller finishes the mutation and persists.
    pub(crate) fn prepare_transition(
        &self,
        case_id: &str,
        evidence_id: &str,
        transition: Transition,
        describe: impl FnOnce(&EvidenceRecord) -> String,
    ) -> Result<(EvidenceKey, EvidenceRecord), CustodyError> {
        let key = evidence_key(case_id, evidence_id)?;
        let mut record = self.load_existing(&key)?;
        let next = transition.apply(&key, record.status)?;

        let event = self.new_event(transition.event_kind(), describe(&record));
        record.status = next;
        record.append_event(event);
        Ok((key, record))
    }

    /// Write the record and emit its notification.
    pub(crate) fn persist_and_notify(
        &mut self,
        key: &EvidenceKey,
        record: &EvidenceRecord,
        notification: NotificationName,
    ) -> Result<(), CustodyError> {
        let payload = serde_json::to_vec(record).map_err(|e| CustodyError::Serialization {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        self.store.put(key, record)?;

        self.sink
            .emit(notification.as_str(), payload)
            .map_err(|e| CustodyError::Notification {
                name: notification.to_string(),
                message: e.message,
            })
    }

    pub(crate) fn log_rejection(&self, operation: &'static str, err: &CustodyError) {
        warn!(
            operation,
            kind = %err.kind(),
            tx_id = self.context.transaction_id(),
            "[cl-02] Rejected: {}",
            err
        );
    }
}
