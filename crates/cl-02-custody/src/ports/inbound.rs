//! # Inbound Ports (Driving Ports)
//!
//! The primary API of the Custody State Machine.

use crate::domain::errors::CustodyError;
use shared_types::{CustodyEvent, EvidenceRecord};

/// Arguments of `CreateEvidence`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEvidenceRequest {
    pub case_id: String,
    pub evidence_id: String,
    pub content_id: String,
    pub content_hash: String,
    pub metadata: String,
}

/// Arguments of `TransferCustody`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCustodyRequest {
    pub case_id: String,
    pub evidence_id: String,
    pub new_custodian: String,
    pub reason: String,
}

/// Arguments of `ArchiveToCold` and `ReactivateFromCold`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleRequest {
    pub case_id: String,
    pub evidence_id: String,
    pub reason: String,
}

/// Arguments of `InvalidateEvidence`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidateEvidenceRequest {
    pub case_id: String,
    pub evidence_id: String,
    pub reason: String,
    /// Ledger transaction the invalidation disputes.
    pub disputed_transaction_ref: String,
}

/// Primary API for the Custody State Machine.
///
/// Every mutating operation performs one read of the target record and, on
/// success, one write plus one notification. A rejected operation writes
/// nothing and emits nothing.
pub trait CustodyApi {
    /// Register new evidence.
    ///
    /// ## Errors
    ///
    /// - `InvalidArgument`: empty required field or malformed content hash
    /// - `AlreadyExists`: the composite key is occupied
    fn create_evidence(
        &mut self,
        request: CreateEvidenceRequest,
    ) -> Result<EvidenceRecord, CustodyError>;

    /// Hand custody to a new custodian. Status is unchanged.
    ///
    /// ## Errors
    ///
    /// - `NotFound`
    /// - `InvalidState`: status is not `ACTIVE` or `REACTIVATED`
    fn transfer_custody(
        &mut self,
        request: TransferCustodyRequest,
    ) -> Result<EvidenceRecord, CustodyError>;

    /// Move `ACTIVE` evidence to cold storage.
    fn archive_to_cold(&mut self, request: LifecycleRequest)
        -> Result<EvidenceRecord, CustodyError>;

    /// Bring `ARCHIVED` evidence back.
    fn reactivate_from_cold(
        &mut self,
        request: LifecycleRequest,
    ) -> Result<EvidenceRecord, CustodyError>;

    /// Declare evidence invalid. Accepted from any status.
    fn invalidate_evidence(
        &mut self,
        request: InvalidateEvidenceRequest,
    ) -> Result<EvidenceRecord, CustodyError>;

    /// Read one record.
    fn get_evidence_summary(
        &self,
        case_id: &str,
        evidence_id: &str,
    ) -> Result<EvidenceRecord, CustodyError>;

    /// Read every record of a case, in store order.
    fn query_evidences_by_case(&self, case_id: &str) -> Result<Vec<EvidenceRecord>, CustodyError>;

    /// Read the custody log of one record, oldest first.
    fn get_custody_chain(
        &self,
        case_id: &str,
        evidence_id: &str,
    ) -> Result<Vec<CustodyEvent>, CustodyError>;
}
