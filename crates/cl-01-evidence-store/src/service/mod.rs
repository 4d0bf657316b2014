//! # Evidence Record Store Service
//!
//! `EvidenceStore` maps composite keys to encoded records on top of any
//! `KeyValueStore`. It is deliberately thin: reads are exact, writes are
//! unconditional, and case enumeration is a lazy `CaseScan`.

mod scan;

pub use scan::CaseScan;

use shared_types::{ensure_identifier, EvidenceKey, EvidenceRecord};
use tracing::debug;

use crate::adapters::JsonRecordCodec;
use crate::domain::errors::StoreError;
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::{KeyValueStore, RecordCodec};

/// The Evidence Record Store.
pub struct EvidenceStore<KV, RC = JsonRecordCodec>
where
    KV: KeyValueStore,
    RC: RecordCodec,
{
    pub(crate) kv_store: KV,
    pub(crate) codec: RC,
}

impl<KV: KeyValueStore> EvidenceStore<KV> {
    /// Create a store using the JSON record encoding.
    pub fn new(kv_store: KV) -> Self {
        Self::with_codec(kv_store, JsonRecordCodec)
    }
}

impl<KV, RC> EvidenceStore<KV, RC>
where
    KV: KeyValueStore,
    RC: RecordCodec,
{
    pub fn with_codec(kv_store: KV, codec: RC) -> Self {
        Self { kv_store, codec }
    }

    /// Read the record at exactly `key`.
    pub fn get(&self, key: &EvidenceKey) -> Result<Option<EvidenceRecord>, StoreError> {
        let raw = self
            .kv_store
            .get(&KeyPrefix::evidence_key(key))
            .map_err(|e| StoreError::database(key, e))?;

        match raw {
            Some(bytes) => {
                let record = self
                    .codec
                    .decode(&bytes)
                    .map_err(|e| StoreError::serialization(key, e))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Write `record` at `key`, replacing whatever was there.
    pub fn put(&mut self, key: &EvidenceKey, record: &EvidenceRecord) -> Result<(), StoreError> {
        let record_key = record.key()?;
        if &record_key != key {
            return Err(StoreError::KeyMismatch {
                key: key.to_string(),
                record_key: record_key.to_string(),
            });
        }

        let bytes = self
            .codec
            .encode(record)
            .map_err(|e| StoreError::serialization(key, e))?;
        self.kv_store
            .put(&KeyPrefix::evidence_key(key), &bytes)
            .map_err(|e| StoreError::database(key, e))?;

        debug!("[cl-01] Stored {} ({} bytes)", key, bytes.len());
        Ok(())
    }

    /// True iff a value is stored at `key`. Does not decode it.
    pub fn exists(&self, key: &EvidenceKey) -> Result<bool, StoreError> {
        self.kv_store
            .exists(&KeyPrefix::evidence_key(key))
            .map_err(|e| StoreError::database(key, e))
    }

    /// Enumerate every record of `case_id` in ascending evidence-id order.
    ///
    /// The returned scan owns an open range iterator and releases it when it
    /// is exhausted, hits a backend error, or is dropped.
    pub fn list_by_case(&self, case_id: &str) -> Result<CaseScan<'_, RC>, StoreError> {
        ensure_identifier("caseId", case_id)?;
        let prefix = KeyPrefix::case_prefix(case_id)?;
        let iter = self
            .kv_store
            .range_by_prefix(&prefix)
            .map_err(|e| StoreError::database(case_id, e))?;

        Ok(CaseScan::new(case_id.to_string(), iter, &self.codec))
    }

    /// Borrow the underlying key-value store.
    pub fn kv_store(&self) -> &KV {
        &self.kv_store
    }

    /// Mutably borrow the underlying key-value store.
    pub fn kv_store_mut(&mut self) -> &mut KV {
        &mut self.kv_store
    }

    /// Unwrap into the underlying key-value store.
    pub fn into_inner(self) -> KV {
        self.kv_store
    }
}
