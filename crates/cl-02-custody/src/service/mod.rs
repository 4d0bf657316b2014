//! # Custody Service
//!
//! The service implementing `CustodyApi`.
//!
//! ## Architecture
//!
//! This service:
//! 1. Validates every request before touching state
//! 2. Enforces the status transition graph
//! 3. Appends exactly one custody event per successful mutation
//! 4. Uses dependency injection for store, transaction context and sink
//!
//! A service instance is built per transaction: the context it holds is the
//! context of one transaction.

mod api;
mod helpers;

use cl_01_evidence_store::{EvidenceStore, KeyValueStore};

use crate::ports::outbound::{NotificationSink, TransactionContext};

/// Dependencies for CustodyService
pub struct CustodyDependencies<KV, TX, NS>
where
    KV: KeyValueStore,
{
    pub store: EvidenceStore<KV>,
    pub context: TX,
    pub sink: NS,
}

/// The Custody State Machine service.
pub struct CustodyService<KV, TX, NS>
where
    KV: KeyValueStore,
    TX: TransactionContext,
    NS: NotificationSink,
{
    /// Evidence record persistence.
    pub(crate) store: EvidenceStore<KV>,
    /// Caller and commit facts of the current transaction.
    pub(crate) context: TX,
    /// Notifications of the current transaction.
    pub(crate) sink: NS,
}

impl<KV, TX, NS> CustodyService<KV, TX, NS>
where
    KV: KeyValueStore,
    TX: TransactionContext,
    NS: NotificationSink,
{
    pub fn new(deps: CustodyDependencies<KV, TX, NS>) -> Self {
        Self {
            store: deps.store,
            context: deps.context,
            sink: deps.sink,
        }
    }

    /// Take the dependencies back, e.g. to commit the store's writes and
    /// forward the sink's notifications.
    pub fn into_parts(self) -> CustodyDependencies<KV, TX, NS> {
        CustodyDependencies {
            store: self.store,
            context: self.context,
            sink: self.sink,
        }
    }

    pub fn store(&self) -> &EvidenceStore<KV> {
        &self.store
    }

    pub fn sink(&self) -> &NS {
        &self.sink
    }
}
