//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Evidence Record Store.
//!
//! These are the interfaces the host ledger implements. The in-memory and
//! file-backed adapters in `crate::adapters` cover tests and single-node use.

use shared_types::EvidenceRecord;

use crate::domain::errors::{KVStoreError, SerializationError};

/// A raw key-value pair as returned by a range iterator.
pub type KvPair = (Vec<u8>, Vec<u8>);

/// Abstract interface for the ledger's world state.
///
/// Production: the host ledger's state database.
/// Testing: `InMemoryKVStore`.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch of puts.
    ///
    /// Either all pairs are applied or none are.
    fn atomic_batch_write(&mut self, writes: Vec<KvPair>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Open an iterator over every pair whose key starts with `prefix`, in
    /// ascending key order.
    ///
    /// The iterator holds ledger resources until `close` is called.
    fn range_by_prefix<'a>(
        &'a self,
        prefix: &[u8],
    ) -> Result<Box<dyn StateIterator + 'a>, KVStoreError>;
}

/// A ledger range iterator with an explicit open/close lifecycle.
pub trait StateIterator {
    /// Advance to the next pair. `None` once exhausted.
    fn next_entry(&mut self) -> Option<Result<KvPair, KVStoreError>>;

    /// Release the iterator. Calling `close` twice is a no-op.
    fn close(&mut self) -> Result<(), KVStoreError>;
}

/// Abstract interface for record serialization.
pub trait RecordCodec: Send + Sync {
    /// Serialize an EvidenceRecord to bytes.
    fn encode(&self, record: &EvidenceRecord) -> Result<Vec<u8>, SerializationError>;

    /// Deserialize bytes to an EvidenceRecord.
    fn decode(&self, data: &[u8]) -> Result<EvidenceRecord, SerializationError>;
}
