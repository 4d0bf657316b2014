//! # Integration Test Flows
//!
//! Tests that the ledger runtime, the custody state machine and the
//! shared-bus work together:
//!
//! 1. **Commit → Bus**: notifications of a committed transaction reach
//!    subscribers, tagged with its transaction id
//! 2. **Reject → Silence**: a rejected transaction publishes nothing
//! 3. **Filtering**: subscribers see only their topics
//! 4. **Serialization**: concurrent submitters never lose an update
//! 5. **Durability**: committed state survives a restart

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    use cl_01_evidence_store::InMemoryKVStore;
    use cl_02_custody::ErrorKind;
    use custody_node::{Caller, Ledger};
    use shared_bus::{EventFilter, EventPublisher, EventTopic, InMemoryEventBus};
    use shared_types::EvidenceStatus;

    use crate::integration::{alice, args, bob, content_hash, submit_err, submit_ok};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn ledger() -> Ledger<InMemoryKVStore> {
        Ledger::in_memory(Arc::new(InMemoryEventBus::new()))
    }

    fn create_args(evidence_id: &str) -> Vec<String> {
        args(&["CASE-1", evidence_id, "cid", &content_hash(b"payload"), "{}"])
    }

    // =============================================================================
    // COMMIT → BUS
    // =============================================================================

    #[tokio::test]
    async fn test_committed_notifications_reach_stream() {
        let ledger = ledger();
        let mut stream = ledger.bus().event_stream(EventFilter::all());

        let created = ledger.submit(&alice(), "CreateEvidence", &create_args("E1"));
        let archived = ledger.submit(&alice(), "ArchiveToCold", &args(&["CASE-1", "E1", "closed"]));

        let first = timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("timeout")
            .expect("stream ended");
        assert_eq!(first.name, "EvidenceCreated");
        assert_eq!(first.transaction_id, created.transaction_id);

        let second = timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("timeout")
            .expect("stream ended");
        assert_eq!(second.name, "EvidenceArchived");
        assert_eq!(second.transaction_id, archived.transaction_id);

        let record = second.record().unwrap();
        assert_eq!(record.status, EvidenceStatus::Archived);
        assert_eq!(record.custody_log.len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_transaction_publishes_nothing() {
        let ledger = ledger();
        let mut sub = ledger.bus().subscribe(EventFilter::all());

        ledger.submit(&alice(), "CreateEvidence", &create_args("E1"));
        ledger.submit(&alice(), "CreateEvidence", &create_args("E1"));
        ledger.submit(&alice(), "ReactivateFromCold", &args(&["CASE-1", "E1", "r"]));
        ledger.submit(&alice(), "TransferCustody", &args(&["CASE-1", "E404", "bob", "r"]));

        let first = sub.recv().await.unwrap();
        assert_eq!(first.name, "EvidenceCreated");
        assert_eq!(sub.try_recv(), Ok(None));
        assert_eq!(ledger.bus().events_published(), 1);
    }

    #[tokio::test]
    async fn test_topic_filter() {
        let ledger = ledger();
        let mut integrity = ledger
            .bus()
            .subscribe(EventFilter::topics(vec![EventTopic::Integrity]));

        ledger.submit(&alice(), "CreateEvidence", &create_args("E1"));
        ledger.submit(&bob(), "TransferCustody", &args(&["CASE-1", "E1", "carol", "lab"]));
        ledger.submit(
            &alice(),
            "InvalidateEvidence",
            &args(&["CASE-1", "E1", "tampered", "tx-x"]),
        );

        let event = timeout(Duration::from_secs(1), integrity.recv())
            .await
            .expect("timeout")
            .unwrap();
        assert_eq!(event.name, "EvidenceInvalidated");
        assert!(integrity.drain().is_empty());
    }

    // =============================================================================
    // SERIALIZATION
    // =============================================================================

    #[test]
    fn test_concurrent_transfers_are_serialized() {
        let ledger = Arc::new(ledger());
        let hash = content_hash(b"payload");
        submit_ok(&*ledger, &alice(), "CreateEvidence", &["CASE-1", "E1", "cid", &hash, ""]);

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    let caller = Caller::new(format!("officer-{i}"), "PoliceMSP");
                    for n in 0..5 {
                        let to = format!("custodian-{i}-{n}");
                        let receipt = ledger.submit(
                            &caller,
                            "TransferCustody",
                            &args(&["CASE-1", "E1", &to, "rotation"]),
                        );
                        assert!(receipt.is_committed());
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let chain = submit_ok(&*ledger, &alice(), "GetCustodyChain", &["CASE-1", "E1"]);
        let events = chain.as_array().unwrap();
        assert_eq!(events.len(), 1 + 8 * 5);

        let mut refs: Vec<_> = events.iter().map(|e| e["transactionRef"].clone()).collect();
        refs.sort_by_key(|v| v.to_string());
        refs.dedup();
        assert_eq!(refs.len(), events.len());
    }

    // =============================================================================
    // DURABILITY
    // =============================================================================

    #[test]
    fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custody.db");
        let hash = content_hash(b"payload");

        {
            let ledger = Ledger::open(&path, Arc::new(InMemoryEventBus::new())).unwrap();
            submit_ok(&ledger, &alice(), "CreateEvidence", &["CASE-1", "E1", "cid", &hash, ""]);
            submit_ok(&ledger, &bob(), "TransferCustody", &["CASE-1", "E1", "carol", "lab"]);
            // Rejected: must not reach the file.
            submit_err(&ledger, &alice(), "ReactivateFromCold", &["CASE-1", "E1", "r"]);
        }

        let ledger = Ledger::open(&path, Arc::new(InMemoryEventBus::new())).unwrap();
        let record = submit_ok(&ledger, &alice(), "GetEvidenceSummary", &["CASE-1", "E1"]);
        assert_eq!(record["currentCustodian"], "carol");
        assert_eq!(record["custodyLog"].as_array().unwrap().len(), 2);

        assert_eq!(
            submit_err(&ledger, &alice(), "CreateEvidence", &["CASE-1", "E1", "cid", &hash, ""]),
            ErrorKind::AlreadyExists
        );
    }
}
