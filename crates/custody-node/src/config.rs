//! # Node Configuration
//!
//! Runtime parameters of the ledger node.
//!
//! Every value has a default and can be overridden from the environment;
//! command-line flags are applied on top by the binary.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Identity used to submit transactions.
    pub caller: CallerConfig,
    /// Notification bus configuration.
    pub bus: BusConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// File holding the committed state. `None` keeps state in memory.
    pub data_file: Option<PathBuf>,
}

/// Submitter identity.
#[derive(Debug, Clone)]
pub struct CallerConfig {
    pub identity: String,
    pub org: String,
}

impl Default for CallerConfig {
    fn default() -> Self {
        Self {
            identity: "admin".to_string(),
            org: "Org1MSP".to_string(),
        }
    }
}

/// Largest accepted notification buffer per subscriber.
pub const MAX_BUS_CAPACITY: usize = 1 << 20;

/// Notification bus configuration.
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Notifications buffered per subscriber.
    pub capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid value for {variable}")]
    InvalidValue { variable: &'static str, name: String },

    #[error("caller identity must not be empty")]
    EmptyCaller,

    #[error("caller organization must not be empty")]
    EmptyOrg,

    #[error("bus capacity must be greater than zero")]
    ZeroCapacity,

    #[error("bus capacity {capacity} exceeds the maximum of {max}")]
    CapacityTooLarge { capacity: usize, max: usize },
}

impl NodeConfig {
    /// Defaults overridden by the environment.
    ///
    /// - `CL_DATA_FILE`: committed state file
    /// - `CL_CALLER_ID`: submitter identity
    /// - `CL_CALLER_ORG`: submitter organization
    /// - `CL_BUS_CAPACITY`: notifications buffered per subscriber
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = env::var("CL_DATA_FILE") {
            config.storage.data_file = Some(PathBuf::from(path));
        }
        if let Ok(identity) = env::var("CL_CALLER_ID") {
            config.caller.identity = identity;
        }
        if let Ok(org) = env::var("CL_CALLER_ORG") {
            config.caller.org = org;
        }
        if let Ok(capacity) = env::var("CL_BUS_CAPACITY") {
            config.bus.capacity = parse_capacity(&capacity)?;
        }

        Ok(config)
    }

    /// Reject configurations the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.caller.identity.trim().is_empty() {
            return Err(ConfigError::EmptyCaller);
        }
        if self.caller.org.trim().is_empty() {
            return Err(ConfigError::EmptyOrg);
        }
        if self.bus.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.bus.capacity > MAX_BUS_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                capacity: self.bus.capacity,
                max: MAX_BUS_CAPACITY,
            });
        }
        Ok(())
    }
}

fn parse_capacity(value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            variable: "CL_BUS_CAPACITY",
            name: value.to_string(),
        })
}
