//! # Domain Errors
//!
//! Error types for the Evidence Record Store.
//!
//! Every variant that concerns a record carries the composite key it was
//! raised for, so a failure can be diagnosed without re-running it.

use shared_types::IdentifierError;
use thiserror::Error;

/// Errors surfaced by `EvidenceStore`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An identifier cannot be encoded into a storage key.
    #[error("invalid identifier: {0}")]
    InvalidKey(#[from] IdentifierError),

    /// The record handed to `put` belongs to a different key.
    #[error("record {record_key} cannot be stored at key {key}")]
    KeyMismatch { key: String, record_key: String },

    /// The underlying key-value store failed.
    #[error("database error at {key}: {message}")]
    Database { key: String, message: String },

    /// A record could not be encoded or decoded.
    #[error("serialization error at {key}: {message}")]
    Serialization { key: String, message: String },
}

impl StoreError {
    pub(crate) fn database(key: impl ToString, err: KVStoreError) -> Self {
        StoreError::Database {
            key: key.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn serialization(key: impl ToString, err: SerializationError) -> Self {
        StoreError::Serialization {
            key: key.to_string(),
            message: err.message,
        }
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },

    /// The range iterator was used after `close`.
    #[error("range iterator already closed")]
    IteratorClosed,
}

/// Record encoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_carries_key() {
        let err = StoreError::database(
            "C1:E1",
            KVStoreError::IOError {
                message: "disk failure".to_string(),
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("C1:E1"));
        assert!(msg.contains("disk failure"));
    }

    #[test]
    fn test_identifier_error_conversion() {
        let err: StoreError = IdentifierError::ReservedCharacter { field: "caseId" }.into();
        assert!(matches!(err, StoreError::InvalidKey(_)));
        assert!(err.to_string().contains("caseId"));
    }
}
