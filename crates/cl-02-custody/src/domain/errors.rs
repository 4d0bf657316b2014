//! # Domain Errors
//!
//! Every failure of a custody operation is a `CustodyError`. Callers that
//! only need the category, such as the dispatch response or a metrics
//! label, use `CustodyError::kind`.

use cl_01_evidence_store::StoreError;
use serde::{Deserialize, Serialize};
use shared_types::{EvidenceStatus, IdentifierError};
use std::fmt;
use thiserror::Error;

/// Stable failure categories reported across the dispatch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidArgument,
    AlreadyExists,
    NotFound,
    InvalidState,
    PersistenceFailure,
    SerializationFailure,
    NotificationFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::InvalidState => "InvalidState",
            ErrorKind::PersistenceFailure => "PersistenceFailure",
            ErrorKind::SerializationFailure => "SerializationFailure",
            ErrorKind::NotificationFailure => "NotificationFailure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during custody operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustodyError {
    /// The operation name is not part of the surface.
    #[error("Invalid function name: {function}")]
    UnknownFunction { function: String },

    /// Wrong number of positional arguments.
    #[error("Incorrect number of arguments. Expecting: {expected} (got {actual})")]
    ArgumentCount {
        function: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// A required argument is empty.
    #[error("{field} cannot be empty")]
    EmptyArgument { field: &'static str },

    /// An identifier cannot be encoded into a storage key.
    #[error("{0}")]
    InvalidIdentifier(#[from] IdentifierError),

    /// The content hash is not a SHA-256 hex digest.
    #[error("Invalid hash format: {reason}")]
    InvalidContentHash { reason: &'static str },

    /// The composite key is already occupied.
    #[error("Evidence already exists: {key}")]
    AlreadyExists { key: String },

    /// No record at the composite key.
    #[error("Evidence not found: {key}")]
    NotFound { key: String },

    /// The record's status does not allow the operation.
    #[error("Cannot {operation} evidence {key}. Current status: {actual}, expected: {expected}")]
    InvalidState {
        key: String,
        operation: &'static str,
        expected: &'static str,
        actual: EvidenceStatus,
    },

    /// The store failed to read or write.
    #[error("Persistence failure at {key}: {message}")]
    Persistence { key: String, message: String },

    /// A record or response could not be encoded or decoded.
    #[error("Serialization failure at {key}: {message}")]
    Serialization { key: String, message: String },

    /// The notification sink rejected the notification.
    #[error("Failed to emit {name}: {message}")]
    Notification { name: String, message: String },
}

impl CustodyError {
    /// Project onto the stable failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CustodyError::UnknownFunction { .. }
            | CustodyError::ArgumentCount { .. }
            | CustodyError::EmptyArgument { .. }
            | CustodyError::InvalidIdentifier(_)
            | CustodyError::InvalidContentHash { .. } => ErrorKind::InvalidArgument,
            CustodyError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            CustodyError::NotFound { .. } => ErrorKind::NotFound,
            CustodyError::InvalidState { .. } => ErrorKind::InvalidState,
            CustodyError::Persistence { .. } => ErrorKind::PersistenceFailure,
            CustodyError::Serialization { .. } => ErrorKind::SerializationFailure,
            CustodyError::Notification { .. } => ErrorKind::NotificationFailure,
        }
    }
}

impl From<StoreError> for CustodyError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidKey(e) => CustodyError::InvalidIdentifier(e),
            StoreError::KeyMismatch { key, record_key } => CustodyError::Persistence {
                key,
                message: format!("record {record_key} written to wrong key"),
            },
            StoreError::Database { key, message } => CustodyError::Persistence { key, message },
            StoreError::Serialization { key, message } => {
                CustodyError::Serialization { key, message }
            }
        }
    }
}
