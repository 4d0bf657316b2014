//! # Key Encoding
//!
//! All keys are prefixed to namespace different data types.
//!
//! Evidence keys are `e:` + `caseId` + NUL + `evidenceId`. The NUL
//! terminator after the case id is what makes case prefixes exact: the
//! prefix of case `C1` is `e:C1\0`, which no key of case `C10` starts with.

use shared_types::{ensure_identifier, EvidenceKey, IdentifierError};

/// Separator between the case and evidence halves of a key.
pub const KEY_SEPARATOR: u8 = 0x00;

/// Key prefixes for the key-value store.
#[derive(Debug, Clone, Copy)]
pub enum KeyPrefix {
    /// Evidence record: `e:{caseId}\0{evidenceId}` -> EvidenceRecord
    Evidence,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Evidence => b"e:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    /// Build the storage key of an evidence record.
    pub fn evidence_key(key: &EvidenceKey) -> Vec<u8> {
        let mut bytes = KeyPrefix::case_prefix_unchecked(key.case_id());
        bytes.extend_from_slice(key.evidence_id().as_bytes());
        bytes
    }

    /// Build the range prefix shared by every record of a case.
    pub fn case_prefix(case_id: &str) -> Result<Vec<u8>, IdentifierError> {
        ensure_identifier("caseId", case_id)?;
        Ok(KeyPrefix::case_prefix_unchecked(case_id))
    }

    /// Recover the composite key from a storage key, if it is an evidence key.
    pub fn decode_evidence_key(bytes: &[u8]) -> Option<EvidenceKey> {
        let rest = bytes.strip_prefix(KeyPrefix::Evidence.as_bytes())?;
        let split = rest.iter().position(|b| *b == KEY_SEPARATOR)?;
        let case_id = std::str::from_utf8(&rest[..split]).ok()?;
        let evidence_id = std::str::from_utf8(&rest[split + 1..]).ok()?;
        EvidenceKey::new(case_id, evidence_id).ok()
    }

    fn case_prefix_unchecked(case_id: &str) -> Vec<u8> {
        let mut bytes = KeyPrefix::Evidence.key(case_id.as_bytes());
        bytes.push(KEY_SEPARATOR);
        bytes
    }
}

/// Render a storage key for logs and error messages.
pub fn display_key(bytes: &[u8]) -> String {
    match KeyPrefix::decode_evidence_key(bytes) {
        Some(key) => key.to_string(),
        None => String::from_utf8_lossy(bytes).replace('\0', ":"),
    }
}
