//! # Ports Layer
//!
//! - `outbound` - What the store requires from its host (key-value backend, codec)

pub mod outbound;
