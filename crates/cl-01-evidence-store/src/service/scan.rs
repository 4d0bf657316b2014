use shared_types::EvidenceRecord;
use tracing::warn;

use crate::domain::errors::StoreError;
use crate::domain::keys::display_key;
use crate::ports::outbound::{RecordCodec, StateIterator};

/// Lazy enumeration of one case's records.
///
/// Values that fail to decode are logged and skipped. A backend error ends
/// the scan after being yielded once. The range iterator is closed exactly
/// once on every path, including early drop.
pub struct CaseScan<'a, RC: RecordCodec> {
    case_id: String,
    iter: Box<dyn StateIterator + 'a>,
    codec: &'a RC,
    skipped: usize,
    finished: bool,
}

impl<'a, RC: RecordCodec> CaseScan<'a, RC> {
    pub(crate) fn new(case_id: String, iter: Box<dyn StateIterator + 'a>, codec: &'a RC) -> Self {
        Self {
            case_id,
            iter,
            codec,
            skipped: 0,
            finished: false,
        }
    }

    /// Number of undecodable values skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn finish(&mut self) -> Result<(), StoreError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.iter
            .close()
            .map_err(|e| StoreError::database(&self.case_id, e))
    }
}

impl<RC: RecordCodec> Iterator for CaseScan<'_, RC> {
    type Item = Result<EvidenceRecord, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.iter.next_entry() {
                None => return self.finish().err().map(Err),
                Some(Err(e)) => {
                    let err = StoreError::database(&self.case_id, e);
                    if let Err(close_err) = self.finish() {
                        warn!("[cl-01] Failed to close scan of {}: {}", self.case_id, close_err);
                    }
                    return Some(Err(err));
                }
                Some(Ok((key, value))) => match self.codec.decode(&value) {
                    Ok(record) => return Some(Ok(record)),
                    Err(e) => {
                        self.skipped += 1;
                        warn!(
                            "[cl-01] Skipping undecodable record {}: {}",
                            display_key(&key),
                            e.message
                        );
                    }
                },
            }
        }
    }
}

impl<RC: RecordCodec> Drop for CaseScan<'_, RC> {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            warn!("[cl-01] Failed to close scan of {}: {}", self.case_id, e);
        }
    }
}
