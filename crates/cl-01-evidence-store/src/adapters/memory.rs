use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::adapters::range::BTreeRangeIterator;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, KvPair, StateIterator};

/// In-memory key-value store.
///
/// Keys are kept ordered so range scans return records in key order.
/// Tracks how many range iterators are currently open, which lets tests
/// assert that every scan released its iterator.
#[derive(Default)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    open_iterators: Arc<AtomicUsize>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of range iterators opened and not yet closed.
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn atomic_batch_write(&mut self, writes: Vec<KvPair>) -> Result<(), KVStoreError> {
        self.data.extend(writes);
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn range_by_prefix<'a>(
        &'a self,
        prefix: &[u8],
    ) -> Result<Box<dyn StateIterator + 'a>, KVStoreError> {
        Ok(Box::new(BTreeRangeIterator::new(
            &self.data,
            prefix,
            Arc::clone(&self.open_iterators),
        )))
    }
}
