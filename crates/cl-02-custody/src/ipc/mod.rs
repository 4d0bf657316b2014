//! # Dispatch Boundary
//!
//! Turns an operation name plus positional string arguments into a typed
//! request, runs it against a `CustodyApi`, and renders a `Response`.
//!
//! - `requests` - Argument parsing and the operation names
//! - `handler` - `invoke` and the response type

pub mod handler;
pub mod requests;

pub use handler::{execute, invoke, Failure, Response};
pub use requests::{functions, CustodyRequest};
