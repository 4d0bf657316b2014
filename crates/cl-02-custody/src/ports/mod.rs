//! # Ports Layer
//!
//! - `inbound` - `CustodyApi` and its typed requests
//! - `outbound` - Transaction context and notification sink

pub mod inbound;
pub mod outbound;
