//! # Notification Names
//!
//! Names under which committed custody operations are announced to
//! off-ledger listeners.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every notification a custody operation can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationName {
    EvidenceCreated,
    CustodyTransferred,
    EvidenceArchived,
    EvidenceReactivated,
    EvidenceInvalidated,
}

impl NotificationName {
    pub const ALL: [NotificationName; 5] = [
        NotificationName::EvidenceCreated,
        NotificationName::CustodyTransferred,
        NotificationName::EvidenceArchived,
        NotificationName::EvidenceReactivated,
        NotificationName::EvidenceInvalidated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationName::EvidenceCreated => "EvidenceCreated",
            NotificationName::CustodyTransferred => "CustodyTransferred",
            NotificationName::EvidenceArchived => "EvidenceArchived",
            NotificationName::EvidenceReactivated => "EvidenceReactivated",
            NotificationName::EvidenceInvalidated => "EvidenceInvalidated",
        }
    }
}

impl fmt::Display for NotificationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known notification name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notification: {0}")]
pub struct UnknownNotification(pub String);

impl FromStr for NotificationName {
    type Err = UnknownNotification;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownNotification(s.to_string()))
    }
}
