//! # Custody-Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── lifecycle.rs    # Custody properties through the dispatch boundary
//! │   └── flows.rs        # Ledger transactions and bus delivery
//! └── benches/
//!     └── custody_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cl-tests
//!
//! # Benchmarks
//! cargo bench -p cl-tests
//! ```

#![allow(dead_code)]

pub mod integration;
