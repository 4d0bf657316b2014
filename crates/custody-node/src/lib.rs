//! # Custody Node
//!
//! Single-node ledger runtime for the custody state machine.
//!
//! ## Modules
//!
//! - `config` - Node configuration from defaults and environment
//! - `ledger` - Serialized transactions over a committed key-value state
//!
//! The `custody-node` binary wraps a `Ledger` in a command-line interface.

pub mod config;
pub mod ledger;

pub use config::{
    BusConfig, CallerConfig, ConfigError, NodeConfig, StorageConfig, MAX_BUS_CAPACITY,
};
pub use ledger::{Caller, Ledger, LedgerError, TransactionReceipt, WriteSet};
