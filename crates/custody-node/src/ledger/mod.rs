//! # Ledger
//!
//! Runs custody operations as serialized, all-or-nothing transactions.
//!
//! ## Transaction Flow
//!
//! ```text
//! submit(caller, function, args)
//!     │
//!     ├─ lock committed state
//!     ├─ assign tx id (UUID v4) and commit time
//!     ├─ run operation against a WriteSet overlay
//!     │
//!     ├─ success ──→ atomic_batch_write(writes) ──→ publish notifications
//!     └─ failure ──→ discard writes and notifications
//! ```
//!
//! Notifications are published while the state lock is held, so listeners
//! observe them in commit order.

mod receipt;
mod write_set;

pub use receipt::TransactionReceipt;
pub use write_set::WriteSet;

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use cl_01_evidence_store::{
    EvidenceStore, FileBackedKVStore, InMemoryKVStore, KVStoreError, KeyValueStore,
};
use cl_02_custody::ipc::{self, functions, Failure, Response};
use cl_02_custody::{
    BufferedNotificationSink, CustodyDependencies, CustodyService, ErrorKind,
    StaticTransactionContext,
};
use custody_telemetry::metrics::HistogramTimer;
use custody_telemetry::{
    metric_inc, NOTIFICATIONS_PUBLISHED, TRANSACTIONS_TOTAL, TRANSACTION_DURATION,
    WRITES_COMMITTED,
};
use shared_bus::{CustodyNotification, EventPublisher, InMemoryEventBus};

/// Ledger runtime errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to open state file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: KVStoreError,
    },

    #[error("failed to commit {writes} writes of {tx_id}: {source}")]
    Commit {
        tx_id: String,
        writes: usize,
        #[source]
        source: KVStoreError,
    },
}

/// Authenticated submitter of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub identity: String,
    pub org: String,
}

impl Caller {
    pub fn new(identity: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            org: org.into(),
        }
    }
}

/// Single-node ledger over a key-value store.
pub struct Ledger<KV: KeyValueStore> {
    /// Committed state. Held for the whole of each transaction.
    state: Mutex<KV>,
    /// Receives notifications of committed transactions.
    bus: Arc<InMemoryEventBus>,
}

impl Ledger<InMemoryKVStore> {
    /// Ledger with volatile state.
    pub fn in_memory(bus: Arc<InMemoryEventBus>) -> Self {
        Self::new(InMemoryKVStore::new(), bus)
    }
}

impl Ledger<FileBackedKVStore> {
    /// Ledger whose committed state persists in `path`.
    pub fn open<P: AsRef<Path>>(path: P, bus: Arc<InMemoryEventBus>) -> Result<Self, LedgerError> {
        let kv = FileBackedKVStore::open(&path).map_err(|source| LedgerError::Open {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Ok(Self::new(kv, bus))
    }
}

impl<KV: KeyValueStore> Ledger<KV> {
    pub fn new(kv: KV, bus: Arc<InMemoryEventBus>) -> Self {
        Self {
            state: Mutex::new(kv),
            bus,
        }
    }

    /// The bus notifications are published to.
    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }

    /// Inspect the committed state.
    pub fn read_state<R>(&self, f: impl FnOnce(&KV) -> R) -> R {
        f(&self.state.lock())
    }

    /// Execute one operation as a transaction.
    ///
    /// The response is a failure if the operation is rejected or its writes
    /// cannot be committed. Either way the committed state is untouched and
    /// nothing is published.
    pub fn submit(&self, caller: &Caller, function: &str, args: &[String]) -> TransactionReceipt {
        let label = metric_label(function);
        let _timer = HistogramTimer::start(&TRANSACTION_DURATION, label);

        let mut state = self.state.lock();
        let tx_id = Uuid::new_v4().to_string();
        let committed_at = Utc::now();
        debug!(
            tx_id = %tx_id,
            function = %function,
            caller = %caller.identity,
            "[cl-node] Transaction started"
        );

        let context =
            StaticTransactionContext::new(&caller.identity, &caller.org, &tx_id, committed_at);
        let mut service = CustodyService::new(CustodyDependencies {
            store: EvidenceStore::new(WriteSet::new(&*state)),
            context,
            sink: BufferedNotificationSink::new(),
        });
        let response = ipc::invoke(&mut service, function, args);
        let parts = service.into_parts();
        let writes = parts.store.into_inner().into_writes();
        let pending = parts.sink.into_pending();

        let mut receipt = TransactionReceipt {
            transaction_id: tx_id,
            committed_at,
            response,
            writes: 0,
            notifications: Vec::new(),
        };

        if !receipt.response.is_success() {
            record_outcome(label, &receipt.response);
            return receipt;
        }

        let write_count = writes.len();
        if write_count > 0 {
            if let Err(source) = state.atomic_batch_write(writes) {
                let err = LedgerError::Commit {
                    tx_id: receipt.transaction_id.clone(),
                    writes: write_count,
                    source,
                };
                error!(tx_id = %receipt.transaction_id, error = %err, "[cl-node] Commit failed");
                receipt.response = Response::Failure(Failure {
                    kind: ErrorKind::PersistenceFailure,
                    message: err.to_string(),
                });
                record_outcome(label, &receipt.response);
                return receipt;
            }
            WRITES_COMMITTED.inc_by(write_count as u64);
        }
        receipt.writes = write_count;

        for notification in pending {
            let event = CustodyNotification::new(
                notification.name,
                &receipt.transaction_id,
                notification.payload,
            );
            metric_inc!(NOTIFICATIONS_PUBLISHED, &[event.name.as_str()]);
            self.bus.publish(event.clone());
            receipt.notifications.push(event);
        }
        drop(state);

        record_outcome(label, &receipt.response);
        info!(
            tx_id = %receipt.transaction_id,
            function = %function,
            writes = receipt.writes,
            notifications = receipt.notifications.len(),
            "[cl-node] Transaction committed"
        );
        receipt
    }
}

/// Bounded label set: unknown operation names share one label.
fn metric_label(function: &str) -> &'static str {
    functions::ALL
        .iter()
        .copied()
        .find(|name| *name == function)
        .unwrap_or("unknown")
}

fn record_outcome(label: &str, response: &Response) {
    let outcome = response.failure().map_or("ok", |f| f.kind.as_str());
    metric_inc!(TRANSACTIONS_TOTAL, &[label, outcome]);
}
