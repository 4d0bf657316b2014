//! # Domain Layer
//!
//! - `keys` - Storage key encoding for evidence records
//! - `errors` - Store, key-value and serialization errors

pub mod errors;
pub mod keys;
