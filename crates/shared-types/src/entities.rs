//! # Core Domain Entities
//!
//! Defines the evidence entities shared by the record store, the custody
//! state machine and the notification bus.
//!
//! ## Clusters
//!
//! - **Identity**: `EvidenceKey` (the composite `caseId:evidenceId` key)
//! - **Lifecycle**: `EvidenceStatus`, `CustodyEventKind`
//! - **Records**: `EvidenceRecord`, `CustodyEvent`
//!
//! ## Wire Format
//!
//! Field names are camelCase (`caseId`, `custodyLog`, `transactionRef`, ...)
//! and enum variants use their upper-case ledger names (`ACTIVE`, `CREATE`).
//! Renaming a field is a breaking change for every record already on the
//! ledger.

use crate::errors::IdentifierError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commit time of a ledger transaction (UTC, RFC 3339 on the wire).
pub type Timestamp = DateTime<Utc>;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Composite identifier of an evidence item: `caseId` + `evidenceId`.
///
/// Identifiers are opaque caller-supplied strings. The only character they
/// may not contain is NUL, which the store uses as the separator between the
/// two halves of the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EvidenceKey {
    case_id: String,
    evidence_id: String,
}

impl EvidenceKey {
    /// Build a key, rejecting identifiers that contain a NUL byte.
    pub fn new(
        case_id: impl Into<String>,
        evidence_id: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let case_id = case_id.into();
        let evidence_id = evidence_id.into();
        ensure_identifier("caseId", &case_id)?;
        ensure_identifier("evidenceId", &evidence_id)?;
        Ok(Self {
            case_id,
            evidence_id,
        })
    }

    /// The case half of the key.
    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    /// The evidence half of the key.
    pub fn evidence_id(&self) -> &str {
        &self.evidence_id
    }
}

impl fmt::Display for EvidenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.case_id, self.evidence_id)
    }
}

/// Reject identifiers that cannot be encoded into a storage key.
pub fn ensure_identifier(field: &'static str, value: &str) -> Result<(), IdentifierError> {
    if value.contains('\0') {
        return Err(IdentifierError::ReservedCharacter { field });
    }
    Ok(())
}

// =============================================================================
// CLUSTER B: LIFECYCLE
// =============================================================================

/// Lifecycle status of an evidence record.
///
/// ```text
/// Active ──archive──▶ Archived ──reactivate──▶ Reactivated
///   │                    │                         │
///   └────────────────────┴──────invalidate─────────┴──▶ Invalidated (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceStatus {
    /// Freshly registered, held in the hot chain.
    Active,
    /// Moved to cold storage.
    Archived,
    /// Brought back from cold storage.
    Reactivated,
    /// Declared invalid (terminal).
    Invalidated,
}

impl EvidenceStatus {
    /// Whether no operation can move the record out of this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Invalidated)
    }

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Archived => "ARCHIVED",
            Self::Reactivated => "REACTIVATED",
            Self::Invalidated => "INVALIDATED",
        }
    }
}

impl fmt::Display for EvidenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of action recorded by a custody event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustodyEventKind {
    Create,
    Transfer,
    Archive,
    Reactivate,
    Invalidate,
}

impl CustodyEventKind {
    /// Wire name of the event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Transfer => "TRANSFER",
            Self::Archive => "ARCHIVE",
            Self::Reactivate => "REACTIVATE",
            Self::Invalidate => "INVALIDATE",
        }
    }
}

impl fmt::Display for CustodyEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// CLUSTER C: RECORDS
// =============================================================================

/// One immutable entry of a custody log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyEvent {
    /// Commit time of the producing transaction.
    pub timestamp: Timestamp,
    /// What happened.
    pub event_kind: CustodyEventKind,
    /// Authenticated caller that performed the action.
    pub actor: String,
    /// Organization of the caller.
    pub actor_org: String,
    /// Human-readable account of the action.
    pub description: String,
    /// Ledger transaction that produced this event.
    pub transaction_ref: String,
}

/// The canonical state of one evidence item.
///
/// `custody_log` is append-only: it is never empty once the record exists,
/// and its insertion order is its chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRecord {
    pub case_id: String,
    pub evidence_id: String,
    /// Locator of the content held outside the ledger.
    pub content_id: String,
    /// Hex SHA-256 of the content, as supplied at registration.
    pub content_hash: String,
    /// Opaque descriptive payload.
    pub metadata: String,
    pub status: EvidenceStatus,
    pub custody_log: Vec<CustodyEvent>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub current_custodian: String,
    pub custodian_org: String,
}

impl EvidenceRecord {
    /// Build a freshly registered record from its genesis event.
    ///
    /// The genesis actor becomes the first custodian and the record starts
    /// in `Active`.
    pub fn register(
        key: &EvidenceKey,
        content_id: String,
        content_hash: String,
        metadata: String,
        genesis: CustodyEvent,
    ) -> Self {
        Self {
            case_id: key.case_id().to_string(),
            evidence_id: key.evidence_id().to_string(),
            content_id,
            content_hash,
            metadata,
            status: EvidenceStatus::Active,
            created_at: genesis.timestamp,
            updated_at: genesis.timestamp,
            current_custodian: genesis.actor.clone(),
            custodian_org: genesis.actor_org.clone(),
            custody_log: vec![genesis],
        }
    }

    /// Composite key of this record.
    pub fn key(&self) -> Result<EvidenceKey, IdentifierError> {
        EvidenceKey::new(self.case_id.clone(), self.evidence_id.clone())
    }

    /// Append an event and move `updated_at` to its timestamp.
    pub fn append_event(&mut self, event: CustodyEvent) {
        self.updated_at = event.timestamp;
        self.custody_log.push(event);
    }

    /// The most recent custody event.
    pub fn last_event(&self) -> Option<&CustodyEvent> {
        self.custody_log.last()
    }
}
