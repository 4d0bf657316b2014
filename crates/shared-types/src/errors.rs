//! # Error Types
//!
//! Errors raised while constructing shared entities.

use thiserror::Error;

/// An identifier cannot be used as part of a storage key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The identifier contains the key separator (NUL).
    #[error("{field} must not contain a NUL character")]
    ReservedCharacter { field: &'static str },
}
