use shared_types::EvidenceRecord;

use crate::domain::errors::SerializationError;
use crate::ports::outbound::RecordCodec;

/// Default record codec using serde_json.
///
/// JSON with the record's camelCase field names is the ledger encoding, so
/// values written here are readable by any other client of the ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRecordCodec;

impl RecordCodec for JsonRecordCodec {
    fn encode(&self, record: &EvidenceRecord) -> Result<Vec<u8>, SerializationError> {
        serde_json::to_vec(record).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    fn decode(&self, data: &[u8]) -> Result<EvidenceRecord, SerializationError> {
        serde_json::from_slice(data).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }
}
