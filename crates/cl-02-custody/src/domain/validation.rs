//! # Input Validation
//!
//! Checks applied before any read of the store. A request that fails here
//! never touches state.

use shared_types::{is_sha256_hex, EvidenceKey, SHA256_HEX_LEN};

use super::errors::CustodyError;

/// Reject an empty required argument.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), CustodyError> {
    if value.is_empty() {
        return Err(CustodyError::EmptyArgument { field });
    }
    Ok(())
}

/// Accept exactly 64 hexadecimal characters, either case.
pub fn validate_content_hash(hash: &str) -> Result<(), CustodyError> {
    if hash.len() != SHA256_HEX_LEN {
        return Err(CustodyError::InvalidContentHash {
            reason: "Expected SHA-256 (64 hex characters)",
        });
    }
    if !is_sha256_hex(hash) {
        return Err(CustodyError::InvalidContentHash {
            reason: "Must be hexadecimal",
        });
    }
    Ok(())
}

/// Build the composite key, rejecting identifiers that cannot be encoded.
pub fn evidence_key(case_id: &str, evidence_id: &str) -> Result<EvidenceKey, CustodyError> {
    Ok(EvidenceKey::new(case_id, evidence_id)?)
}
