//! Request execution and response rendering.

use serde::{Deserialize, Serialize};

use super::requests::CustodyRequest;
use crate::domain::errors::{CustodyError, ErrorKind};
use crate::ports::inbound::CustodyApi;

/// Structured failure returned across the dispatch boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&CustodyError> for Failure {
    fn from(err: &CustodyError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// JSON payload: a record, a record list or an event list.
    Success { payload: Vec<u8> },
    Failure(Failure),
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Response::Success { payload } => Some(payload),
            Response::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Response::Success { .. } => None,
            Response::Failure(failure) => Some(failure),
        }
    }

    /// Render as a single JSON document: the payload on success, the
    /// failure object otherwise.
    pub fn to_json(&self) -> String {
        match self {
            Response::Success { payload } => String::from_utf8_lossy(payload).into_owned(),
            Response::Failure(failure) => serde_json::to_string(failure)
                .unwrap_or_else(|_| format!("{{\"kind\":\"{}\"}}", failure.kind)),
        }
    }
}

impl From<Result<Vec<u8>, CustodyError>> for Response {
    fn from(result: Result<Vec<u8>, CustodyError>) -> Self {
        match result {
            Ok(payload) => Response::Success { payload },
            Err(err) => Response::Failure(Failure::from(&err)),
        }
    }
}

/// Run a parsed request and encode its result as JSON.
pub fn execute<A: CustodyApi>(
    api: &mut A,
    request: CustodyRequest,
) -> Result<Vec<u8>, CustodyError> {
    let function = request.function();
    let encoded = match request {
        CustodyRequest::Create(r) => serde_json::to_vec(&api.create_evidence(r)?),
        CustodyRequest::Transfer(r) => serde_json::to_vec(&api.transfer_custody(r)?),
        CustodyRequest::Archive(r) => serde_json::to_vec(&api.archive_to_cold(r)?),
        CustodyRequest::Reactivate(r) => serde_json::to_vec(&api.reactivate_from_cold(r)?),
        CustodyRequest::Invalidate(r) => serde_json::to_vec(&api.invalidate_evidence(r)?),
        CustodyRequest::Summary {
            case_id,
            evidence_id,
        } => serde_json::to_vec(&api.get_evidence_summary(&case_id, &evidence_id)?),
        CustodyRequest::ByCase { case_id } => {
            serde_json::to_vec(&api.query_evidences_by_case(&case_id)?)
        }
        CustodyRequest::Chain {
            case_id,
            evidence_id,
        } => serde_json::to_vec(&api.get_custody_chain(&case_id, &evidence_id)?),
    };
    encoded.map_err(|e| CustodyError::Serialization {
        key: function.to_string(),
        message: e.to_string(),
    })
}

/// Parse, run and render one invocation.
pub fn invoke<A: CustodyApi>(api: &mut A, function: &str, args: &[String]) -> Response {
    CustodyRequest::parse(function, args)
        .and_then(|request| execute(api, request))
        .into()
}
