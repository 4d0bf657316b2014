//! # Status Transitions
//!
//! ```text
//!              TransferCustody (status unchanged)
//!                 ┌────┐            ┌────┐
//!                 ▼    │            ▼    │
//!  Create ──► ACTIVE ──┴─Archive─► ARCHIVED ──Reactivate──► REACTIVATED
//!               │                    │                          │
//!               └────────────── Invalidate ─────────────────────┘
//!                                    ▼
//!                               INVALIDATED (terminal)
//! ```
//!
//! Transfer is allowed from `ACTIVE` and `REACTIVATED`. Invalidation is
//! accepted from any status; re-invalidating appends another event.

use shared_types::{CustodyEventKind, EvidenceKey, EvidenceStatus, NotificationName};

use super::errors::CustodyError;

/// Description recorded on the genesis event.
pub const CREATION_DESCRIPTION: &str = "Evidence created and registered";

/// A mutation applied to an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Transfer,
    Archive,
    Reactivate,
    Invalidate,
}

impl Transition {
    /// Whether the transition may start from `status`.
    pub fn allowed_from(&self, status: EvidenceStatus) -> bool {
        match self {
            Transition::Transfer => {
                matches!(status, EvidenceStatus::Active | EvidenceStatus::Reactivated)
            }
            Transition::Archive => status == EvidenceStatus::Active,
            Transition::Reactivate => status == EvidenceStatus::Archived,
            Transition::Invalidate => true,
        }
    }

    /// Status after the transition.
    pub fn target(&self, current: EvidenceStatus) -> EvidenceStatus {
        match self {
            Transition::Transfer => current,
            Transition::Archive => EvidenceStatus::Archived,
            Transition::Reactivate => EvidenceStatus::Reactivated,
            Transition::Invalidate => EvidenceStatus::Invalidated,
        }
    }

    /// Validate the transition against the current status.
    ///
    /// Returns the status the record moves to.
    pub fn apply(
        &self,
        key: &EvidenceKey,
        current: EvidenceStatus,
    ) -> Result<EvidenceStatus, CustodyError> {
        if !self.allowed_from(current) {
            return Err(CustodyError::InvalidState {
                key: key.to_string(),
                operation: self.verb(),
                expected: self.expected(),
                actual: current,
            });
        }
        Ok(self.target(current))
    }

    pub fn event_kind(&self) -> CustodyEventKind {
        match self {
            Transition::Transfer => CustodyEventKind::Transfer,
            Transition::Archive => CustodyEventKind::Archive,
            Transition::Reactivate => CustodyEventKind::Reactivate,
            Transition::Invalidate => CustodyEventKind::Invalidate,
        }
    }

    pub fn notification(&self) -> NotificationName {
        match self {
            Transition::Transfer => NotificationName::CustodyTransferred,
            Transition::Archive => NotificationName::EvidenceArchived,
            Transition::Reactivate => NotificationName::EvidenceReactivated,
            Transition::Invalidate => NotificationName::EvidenceInvalidated,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Transition::Transfer => "transfer custody of",
            Transition::Archive => "archive",
            Transition::Reactivate => "reactivate",
            Transition::Invalidate => "invalidate",
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            Transition::Transfer => "ACTIVE or REACTIVATED",
            Transition::Archive => "ACTIVE",
            Transition::Reactivate => "ARCHIVED",
            Transition::Invalidate => "any",
        }
    }
}

pub fn transfer_description(previous: &str, new_custodian: &str, reason: &str) -> String {
    format!("Custody transferred from {previous} to {new_custodian}. Reason: {reason}")
}

pub fn archive_description(reason: &str) -> String {
    format!("Evidence archived to cold chain. Reason: {reason}")
}

pub fn reactivate_description(reason: &str) -> String {
    format!("Evidence reactivated from cold chain. Reason: {reason}")
}

pub fn invalidate_description(reason: &str, disputed_transaction_ref: &str) -> String {
    format!("Evidence invalidated. Reason: {reason}. Wrong TxID: {disputed_transaction_ref}")
}
