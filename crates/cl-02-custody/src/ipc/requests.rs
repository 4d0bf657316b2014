//! Positional argument parsing.

use crate::domain::errors::CustodyError;
use crate::ports::inbound::{
    CreateEvidenceRequest, InvalidateEvidenceRequest, LifecycleRequest, TransferCustodyRequest,
};

/// Operation names of the dispatch surface.
pub mod functions {
    pub const CREATE_EVIDENCE: &str = "CreateEvidence";
    pub const TRANSFER_CUSTODY: &str = "TransferCustody";
    pub const ARCHIVE_TO_COLD: &str = "ArchiveToCold";
    pub const REACTIVATE_FROM_COLD: &str = "ReactivateFromCold";
    pub const INVALIDATE_EVIDENCE: &str = "InvalidateEvidence";
    pub const GET_EVIDENCE_SUMMARY: &str = "GetEvidenceSummary";
    pub const QUERY_EVIDENCES_BY_CASE: &str = "QueryEvidencesByCase";
    pub const GET_CUSTODY_CHAIN: &str = "GetCustodyChain";

    pub const ALL: [&str; 8] = [
        CREATE_EVIDENCE,
        TRANSFER_CUSTODY,
        ARCHIVE_TO_COLD,
        REACTIVATE_FROM_COLD,
        INVALIDATE_EVIDENCE,
        GET_EVIDENCE_SUMMARY,
        QUERY_EVIDENCES_BY_CASE,
        GET_CUSTODY_CHAIN,
    ];
}

/// A fully parsed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustodyRequest {
    Create(CreateEvidenceRequest),
    Transfer(TransferCustodyRequest),
    Archive(LifecycleRequest),
    Reactivate(LifecycleRequest),
    Invalidate(InvalidateEvidenceRequest),
    Summary { case_id: String, evidence_id: String },
    ByCase { case_id: String },
    Chain { case_id: String, evidence_id: String },
}

impl CustodyRequest {
    /// Parse `function` and its positional arguments.
    ///
    /// Argument counts must match exactly.
    pub fn parse(function: &str, args: &[String]) -> Result<Self, CustodyError> {
        use functions::*;

        let request = match function {
            CREATE_EVIDENCE => {
                let [case_id, evidence_id, content_id, content_hash, metadata] = positional(
                    CREATE_EVIDENCE,
                    "caseID, evidenceID, cid, hash, metadata",
                    args,
                )?;
                CustodyRequest::Create(CreateEvidenceRequest {
                    case_id,
                    evidence_id,
                    content_id,
                    content_hash,
                    metadata,
                })
            }
            TRANSFER_CUSTODY => {
                let [case_id, evidence_id, new_custodian, reason] = positional(
                    TRANSFER_CUSTODY,
                    "caseID, evidenceID, newCustodian, transferReason",
                    args,
                )?;
                CustodyRequest::Transfer(TransferCustodyRequest {
                    case_id,
                    evidence_id,
                    new_custodian,
                    reason,
                })
            }
            ARCHIVE_TO_COLD => {
                let [case_id, evidence_id, reason] = positional(
                    ARCHIVE_TO_COLD,
                    "caseID, evidenceID, archiveReason",
                    args,
                )?;
                CustodyRequest::Archive(LifecycleRequest {
                    case_id,
                    evidence_id,
                    reason,
                })
            }
            REACTIVATE_FROM_COLD => {
                let [case_id, evidence_id, reason] = positional(
                    REACTIVATE_FROM_COLD,
                    "caseID, evidenceID, reactivationReason",
                    args,
                )?;
                CustodyRequest::Reactivate(LifecycleRequest {
                    case_id,
                    evidence_id,
                    reason,
                })
            }
            INVALIDATE_EVIDENCE => {
                let [case_id, evidence_id, reason, disputed_transaction_ref] = positional(
                    INVALIDATE_EVIDENCE,
                    "caseID, evidenceID, reason, wrongTxID",
                    args,
                )?;
                CustodyRequest::Invalidate(InvalidateEvidenceRequest {
                    case_id,
                    evidence_id,
                    reason,
                    disputed_transaction_ref,
                })
            }
            GET_EVIDENCE_SUMMARY => {
                let [case_id, evidence_id] =
                    positional(GET_EVIDENCE_SUMMARY, "caseID, evidenceID", args)?;
                CustodyRequest::Summary {
                    case_id,
                    evidence_id,
                }
            }
            QUERY_EVIDENCES_BY_CASE => {
                let [case_id] = positional(QUERY_EVIDENCES_BY_CASE, "caseID", args)?;
                CustodyRequest::ByCase { case_id }
            }
            GET_CUSTODY_CHAIN => {
                let [case_id, evidence_id] =
                    positional(GET_CUSTODY_CHAIN, "caseID, evidenceID", args)?;
                CustodyRequest::Chain {
                    case_id,
                    evidence_id,
                }
            }
            other => {
                return Err(CustodyError::UnknownFunction {
                    function: other.to_string(),
                })
            }
        };
        Ok(request)
    }

    /// Operation name of this request.
    pub fn function(&self) -> &'static str {
        match self {
            CustodyRequest::Create(_) => functions::CREATE_EVIDENCE,
            CustodyRequest::Transfer(_) => functions::TRANSFER_CUSTODY,
            CustodyRequest::Archive(_) => functions::ARCHIVE_TO_COLD,
            CustodyRequest::Reactivate(_) => functions::REACTIVATE_FROM_COLD,
            CustodyRequest::Invalidate(_) => functions::INVALIDATE_EVIDENCE,
            CustodyRequest::Summary { .. } => functions::GET_EVIDENCE_SUMMARY,
            CustodyRequest::ByCase { .. } => functions::QUERY_EVIDENCES_BY_CASE,
            CustodyRequest::Chain { .. } => functions::GET_CUSTODY_CHAIN,
        }
    }

    /// Whether the request only reads state.
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            CustodyRequest::Summary { .. }
                | CustodyRequest::ByCase { .. }
                | CustodyRequest::Chain { .. }
        )
    }
}

fn positional<const N: usize>(
    function: &'static str,
    expected: &'static str,
    args: &[String],
) -> Result<[String; N], CustodyError> {
    <[String; N]>::try_from(args.to_vec()).map_err(|given| CustodyError::ArgumentCount {
        function,
        expected,
        actual: given.len(),
    })
}
