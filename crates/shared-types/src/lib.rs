//! # Shared Types Crate
//!
//! Domain entities shared by every crate of the evidence custody ledger.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `EvidenceRecord` and `CustodyEvent` are
//!   defined once; the store persists them, the state machine mutates them,
//!   the bus carries them.
//! - **Field-Stable Encoding**: the serde representation is the ledger's wire
//!   format and must round-trip exactly for every record ever written.

pub mod entities;
pub mod errors;
pub mod hashing;
pub mod notifications;

pub use entities::*;
pub use errors::*;
pub use hashing::{compute_content_hash, is_sha256_hex, SHA256_HEX_LEN};
pub use notifications::{NotificationName, UnknownNotification};
