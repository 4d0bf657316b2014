use std::collections::btree_map::Range;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KvPair, StateIterator};

/// Prefix iterator over a `BTreeMap`, shared by the map-backed stores.
///
/// Registers itself in `open` on creation and deregisters on `close`.
pub(crate) struct BTreeRangeIterator<'a> {
    entries: Range<'a, Vec<u8>, Vec<u8>>,
    prefix: Vec<u8>,
    open: Arc<AtomicUsize>,
    closed: bool,
}

impl<'a> BTreeRangeIterator<'a> {
    pub(crate) fn new(
        data: &'a std::collections::BTreeMap<Vec<u8>, Vec<u8>>,
        prefix: &[u8],
        open: Arc<AtomicUsize>,
    ) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        let entries =
            data.range::<Vec<u8>, _>((Bound::Included(prefix.to_vec()), Bound::Unbounded));
        Self {
            entries,
            prefix: prefix.to_vec(),
            open,
            closed: false,
        }
    }
}

impl StateIterator for BTreeRangeIterator<'_> {
    fn next_entry(&mut self) -> Option<Result<KvPair, KVStoreError>> {
        if self.closed {
            return Some(Err(KVStoreError::IteratorClosed));
        }
        let (key, value) = self.entries.next()?;
        if !key.starts_with(&self.prefix) {
            return None;
        }
        Some(Ok((key.clone(), value.clone())))
    }

    fn close(&mut self) -> Result<(), KVStoreError> {
        if !self.closed {
            self.closed = true;
            self.open.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
