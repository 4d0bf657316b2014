//! # Custody Lifecycle Tests
//!
//! Custody properties checked end to end: named operation with positional
//! arguments, ledger transaction, committed state, JSON response.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cl_01_evidence_store::InMemoryKVStore;
    use cl_02_custody::ErrorKind;
    use custody_node::Ledger;
    use serde_json::Value;
    use shared_bus::InMemoryEventBus;

    use crate::integration::{alice, bob, content_hash, submit_err, submit_ok};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn ledger() -> Ledger<InMemoryKVStore> {
        Ledger::in_memory(Arc::new(InMemoryEventBus::new()))
    }

    fn register(ledger: &Ledger<InMemoryKVStore>, case_id: &str, evidence_id: &str) -> Value {
        let hash = content_hash(evidence_id.as_bytes());
        submit_ok(
            ledger,
            &alice(),
            "CreateEvidence",
            &[case_id, evidence_id, "bafy-content", &hash, "{\"kind\":\"photo\"}"],
        )
    }

    fn summary(ledger: &Ledger<InMemoryKVStore>, case_id: &str, evidence_id: &str) -> Value {
        submit_ok(ledger, &alice(), "GetEvidenceSummary", &[case_id, evidence_id])
    }

    fn log_len(record: &Value) -> usize {
        record["custodyLog"].as_array().map_or(0, Vec::len)
    }

    // =============================================================================
    // REGISTRATION
    // =============================================================================

    #[test]
    fn test_create_then_summary() {
        let ledger = ledger();
        register(&ledger, "CASE-7", "IMG-1");

        let record = summary(&ledger, "CASE-7", "IMG-1");
        assert_eq!(record["status"], "ACTIVE");
        assert_eq!(log_len(&record), 1);
        assert_eq!(record["contentHash"], content_hash(b"IMG-1"));
        assert_eq!(record["currentCustodian"], "alice");
        assert_eq!(record["custodianOrg"], "ForensicLabMSP");
        assert_eq!(record["createdAt"], record["updatedAt"]);
    }

    #[test]
    fn test_duplicate_create_leaves_record_unchanged() {
        let ledger = ledger();
        let original = register(&ledger, "CASE-7", "IMG-1");

        let kind = submit_err(
            &ledger,
            &bob(),
            "CreateEvidence",
            &["CASE-7", "IMG-1", "other", &"f".repeat(64), ""],
        );
        assert_eq!(kind, ErrorKind::AlreadyExists);
        assert_eq!(summary(&ledger, "CASE-7", "IMG-1"), original);
    }

    #[test]
    fn test_hash_format() {
        let ledger = ledger();
        for bad in ["abc".to_string(), "g".repeat(64), "a".repeat(63)] {
            let kind =
                submit_err(&ledger, &alice(), "CreateEvidence", &["C", "E", "cid", &bad, ""]);
            assert_eq!(kind, ErrorKind::InvalidArgument);
        }
        submit_ok(&ledger, &alice(), "CreateEvidence", &["C", "E1", "cid", &"AB".repeat(32), ""]);
        submit_ok(&ledger, &alice(), "CreateEvidence", &["C", "E2", "cid", &"ab".repeat(32), ""]);
    }

    #[test]
    fn test_argument_count_is_exact() {
        let ledger = ledger();
        let kind = submit_err(&ledger, &alice(), "ArchiveToCold", &["C", "E"]);
        assert_eq!(kind, ErrorKind::InvalidArgument);
        let kind = submit_err(&ledger, &alice(), "GetEvidenceSummary", &["C", "E", "extra"]);
        assert_eq!(kind, ErrorKind::InvalidArgument);
        let kind = submit_err(&ledger, &alice(), "PurgeEvidence", &[]);
        assert_eq!(kind, ErrorKind::InvalidArgument);
    }

    // =============================================================================
    // TRANSITIONS
    // =============================================================================

    #[test]
    fn test_log_grows_by_one_per_successful_mutation() {
        let ledger = ledger();
        register(&ledger, "C", "E");
        submit_ok(&ledger, &bob(), "TransferCustody", &["C", "E", "carol", "analysis"]);
        submit_ok(&ledger, &alice(), "ArchiveToCold", &["C", "E", "closed"]);
        submit_err(&ledger, &alice(), "TransferCustody", &["C", "E", "dave", "x"]);
        submit_ok(&ledger, &alice(), "ReactivateFromCold", &["C", "E", "appeal"]);
        submit_ok(&ledger, &bob(), "TransferCustody", &["C", "E", "erin", "court"]);

        let record = summary(&ledger, "C", "E");
        assert_eq!(record["status"], "REACTIVATED");
        assert_eq!(record["currentCustodian"], "erin");
        assert_eq!(record["custodianOrg"], "PoliceMSP");
        assert_eq!(log_len(&record), 5);
    }

    #[test]
    fn test_archive_requires_active() {
        let ledger = ledger();
        register(&ledger, "C", "E");
        submit_ok(&ledger, &alice(), "ArchiveToCold", &["C", "E", "closed"]);
        let before = summary(&ledger, "C", "E");

        let kind = submit_err(&ledger, &alice(), "ArchiveToCold", &["C", "E", "again"]);
        assert_eq!(kind, ErrorKind::InvalidState);
        assert_eq!(summary(&ledger, "C", "E"), before);
    }

    #[test]
    fn test_invalidate_from_each_live_status() {
        let ledger = ledger();
        register(&ledger, "C", "active");
        register(&ledger, "C", "archived");
        register(&ledger, "C", "reactivated");
        submit_ok(&ledger, &alice(), "ArchiveToCold", &["C", "archived", "r"]);
        submit_ok(&ledger, &alice(), "ArchiveToCold", &["C", "reactivated", "r"]);
        submit_ok(&ledger, &alice(), "ReactivateFromCold", &["C", "reactivated", "r"]);

        for id in ["active", "archived", "reactivated"] {
            let record = submit_ok(
                &ledger,
                &alice(),
                "InvalidateEvidence",
                &["C", id, "tampered", "tx-disputed"],
            );
            assert_eq!(record["status"], "INVALIDATED", "{id}");
            let last = &record["custodyLog"][log_len(&record) - 1];
            assert_eq!(last["eventKind"], "INVALIDATE");
            assert!(last["description"]
                .as_str()
                .unwrap_or_default()
                .contains("tx-disputed"));
        }
    }

    #[test]
    fn test_worked_example() {
        let ledger = ledger();
        register(&ledger, "C", "E");
        submit_ok(&ledger, &alice(), "TransferCustody", &["C", "E", "bob", "handover"]);
        submit_ok(&ledger, &alice(), "ArchiveToCold", &["C", "E", "closed"]);
        submit_ok(&ledger, &alice(), "ReactivateFromCold", &["C", "E", "appeal"]);

        let kind = submit_err(&ledger, &alice(), "ArchiveToCold", &["C", "E", "again"]);
        assert_eq!(kind, ErrorKind::InvalidState);
        assert_eq!(log_len(&summary(&ledger, "C", "E")), 4);

        let record = submit_ok(&ledger, &alice(), "InvalidateEvidence", &["C", "E", "bad", "tx-0"]);
        assert_eq!(record["status"], "INVALIDATED");
        assert_eq!(log_len(&record), 5);
    }

    // =============================================================================
    // QUERIES
    // =============================================================================

    #[test]
    fn test_query_by_case_returns_exactly_the_case() {
        let ledger = ledger();
        register(&ledger, "A", "1");
        register(&ledger, "A", "2");
        register(&ledger, "AB", "1");
        register(&ledger, "B", "1");

        let records = submit_ok(&ledger, &alice(), "QueryEvidencesByCase", &["A"]);
        let ids: Vec<_> = records
            .as_array()
            .unwrap()
            .iter()
            .map(|r| (r["caseId"].clone(), r["evidenceId"].clone()))
            .collect();
        assert_eq!(ids, vec![("A".into(), "1".into()), ("A".into(), "2".into())]);

        let none = submit_ok(&ledger, &alice(), "QueryEvidencesByCase", &["X"]);
        assert_eq!(none, Value::Array(Vec::new()));
    }

    #[test]
    fn test_chain_has_one_event_per_mutation_plus_genesis() {
        let ledger = ledger();
        register(&ledger, "C", "E");
        let mutations = 3;
        for to in ["b", "c", "d"] {
            submit_ok(&ledger, &alice(), "TransferCustody", &["C", "E", to, "hop"]);
        }

        let chain = submit_ok(&ledger, &alice(), "GetCustodyChain", &["C", "E"]);
        assert_eq!(chain.as_array().unwrap().len(), mutations + 1);
        assert_eq!(chain, summary(&ledger, "C", "E")["custodyLog"]);
    }

    #[test]
    fn test_missing_record() {
        let ledger = ledger();
        assert_eq!(
            submit_err(&ledger, &alice(), "GetCustodyChain", &["C", "E"]),
            ErrorKind::NotFound
        );
        assert_eq!(
            submit_err(&ledger, &alice(), "ArchiveToCold", &["C", "E", "r"]),
            ErrorKind::NotFound
        );
    }
}
