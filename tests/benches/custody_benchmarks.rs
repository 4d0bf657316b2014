//! # Custody-Ledger Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | cl-01 Evidence Store | Case prefix scan over N records |
//! | cl-02 Custody | Transfer on a record with a long custody log |
//! | custody-node | Full create transaction incl. commit and publish |

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cl_01_evidence_store::{EvidenceStore, InMemoryKVStore};
use cl_02_custody::{
    BufferedNotificationSink, CreateEvidenceRequest, CustodyApi, CustodyDependencies,
    CustodyService, StaticTransactionContext, TransferCustodyRequest,
};
use custody_node::{Caller, Ledger};
use shared_bus::InMemoryEventBus;
use shared_types::compute_content_hash;

type Service = CustodyService<InMemoryKVStore, StaticTransactionContext, BufferedNotificationSink>;

fn service() -> Service {
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    CustodyService::new(CustodyDependencies {
        store: EvidenceStore::new(InMemoryKVStore::new()),
        context: StaticTransactionContext::new("bench", "BenchMSP", "tx-bench", at),
        sink: BufferedNotificationSink::new(),
    })
}

fn create(service: &mut Service, case_id: &str, evidence_id: &str) {
    service
        .create_evidence(CreateEvidenceRequest {
            case_id: case_id.to_string(),
            evidence_id: evidence_id.to_string(),
            content_id: "cid".to_string(),
            content_hash: compute_content_hash(evidence_id.as_bytes()),
            metadata: String::new(),
        })
        .unwrap();
}

fn transfer(service: &mut Service, to: &str) {
    service
        .transfer_custody(TransferCustodyRequest {
            case_id: "C".to_string(),
            evidence_id: "E".to_string(),
            new_custodian: to.to_string(),
            reason: "bench".to_string(),
        })
        .unwrap();
}

// ============================================================================
// CL-01: Case scan
// ============================================================================

fn bench_case_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("cl-01-case-scan");
    group.measurement_time(Duration::from_secs(5));

    for size in [10, 100, 1000] {
        let mut service = service();
        for i in 0..size {
            create(&mut service, "TARGET", &format!("E{i:05}"));
            create(&mut service, "OTHER", &format!("E{i:05}"));
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("query_by_case", size), &size, |b, _| {
            b.iter(|| black_box(service.query_evidences_by_case("TARGET").unwrap().len()))
        });
    }
    group.finish();
}

// ============================================================================
// CL-02: Transfer cost as the custody log grows
// ============================================================================

fn bench_transfer_long_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("cl-02-transfer");

    for log_len in [1, 100, 1000] {
        let mut service = service();
        create(&mut service, "C", "E");
        for i in 1..log_len {
            transfer(&mut service, &format!("holder-{i}"));
        }

        group.bench_with_input(BenchmarkId::new("transfer", log_len), &log_len, |b, _| {
            b.iter(|| transfer(&mut service, black_box("next")))
        });
    }
    group.finish();
}

// ============================================================================
// CUSTODY-NODE: Full transaction
// ============================================================================

fn bench_ledger_create(c: &mut Criterion) {
    let ledger = Ledger::in_memory(Arc::new(InMemoryEventBus::new()));
    let _listener = ledger.bus().subscribe(shared_bus::EventFilter::all());
    let caller = Caller::new("bench", "BenchMSP");
    let hash = compute_content_hash(b"bench");
    let mut next = 0u64;

    c.bench_function("custody-node/create_transaction", |b| {
        b.iter(|| {
            next += 1;
            let args = vec![
                "CASE".to_string(),
                format!("E{next}"),
                "cid".to_string(),
                hash.clone(),
                String::new(),
            ];
            black_box(ledger.submit(&caller, "CreateEvidence", &args).is_committed())
        })
    });
}

criterion_group!(
    benches,
    bench_case_scan,
    bench_transfer_long_log,
    bench_ledger_create
);
criterion_main!(benches);
