//! # Domain Layer
//!
//! - `errors` - `CustodyError` and the stable `ErrorKind` taxonomy
//! - `transitions` - The status transition graph and event descriptions
//! - `validation` - Input checks applied before any read or write

pub mod errors;
pub mod transitions;
pub mod validation;

pub use errors::{CustodyError, ErrorKind};
pub use transitions::Transition;
