//! # Evidence Record Store (cl-01)
//!
//! The Evidence Record Store is the persistence layer for evidence records.
//! It owns the storage key encoding and nothing else: it never validates
//! lifecycle rules and never checks for concurrent writers.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Exact Lookup | `get` never partial-matches a key |
//! | 2 | Case Prefix | Every record of a case shares the prefix `e:<caseId>\0` |
//! | 3 | Iterator Release | Range iterators are closed on every exit path |
//! | 4 | Best-Effort Scan | Undecodable values are skipped during `list_by_case` |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Key encoding and error types
//! - `ports/` - Outbound traits (key-value store, record codec)
//! - `adapters/` - In-memory and file-backed stores, JSON codec
//! - `service/` - `EvidenceStore` and the lazy `CaseScan`
//!
//! ## Usage
//!
//! ```ignore
//! use cl_01_evidence_store::{EvidenceStore, InMemoryKVStore};
//!
//! let mut store = EvidenceStore::new(InMemoryKVStore::new());
//! store.put(&key, &record)?;
//! let found = store.get(&key)?;
//! let records: Vec<_> = store.list_by_case("C1")?.collect::<Result<_, _>>()?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FileBackedKVStore, InMemoryKVStore, JsonRecordCodec};
pub use domain::errors::{KVStoreError, SerializationError, StoreError};
pub use domain::keys::KeyPrefix;
pub use ports::outbound::{KeyValueStore, KvPair, RecordCodec, StateIterator};
pub use service::{CaseScan, EvidenceStore};
