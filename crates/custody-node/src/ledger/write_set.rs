//! Per-transaction write buffer over the committed state.

use std::collections::BTreeMap;

use cl_01_evidence_store::{KVStoreError, KeyValueStore, KvPair, StateIterator};

/// Buffers the writes of one transaction on top of the committed state.
///
/// Point reads see the transaction's own writes. Range scans read the
/// committed state only. Nothing reaches the committed store until the
/// buffered writes are handed to `atomic_batch_write`.
pub struct WriteSet<'a, KV: KeyValueStore> {
    committed: &'a KV,
    writes: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl<'a, KV: KeyValueStore> WriteSet<'a, KV> {
    pub fn new(committed: &'a KV) -> Self {
        Self {
            committed,
            writes: BTreeMap::new(),
        }
    }

    /// Number of distinct keys written.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// The buffered writes in key order, ending the borrow of the committed
    /// state.
    pub fn into_writes(self) -> Vec<KvPair> {
        self.writes.into_iter().collect()
    }
}

impl<KV: KeyValueStore> KeyValueStore for WriteSet<'_, KV> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        match self.writes.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => self.committed.get(key),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.writes.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn atomic_batch_write(&mut self, writes: Vec<KvPair>) -> Result<(), KVStoreError> {
        self.writes.extend(writes);
        Ok(())
    }

    fn range_by_prefix<'b>(
        &'b self,
        prefix: &[u8],
    ) -> Result<Box<dyn StateIterator + 'b>, KVStoreError> {
        self.committed.range_by_prefix(prefix)
    }
}
