//! # Adapters
//!
//! - `memory` - `InMemoryKVStore` for tests and the default node
//! - `file` - `FileBackedKVStore`, durable single-file store
//! - `codec` - `JsonRecordCodec`, the ledger's record encoding

pub mod codec;
pub mod file;
pub mod memory;
mod range;

pub use codec::JsonRecordCodec;
pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;
