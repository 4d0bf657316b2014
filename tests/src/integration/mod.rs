//! Cross-crate integration tests.

pub mod flows;
pub mod lifecycle;

use custody_node::{Caller, Ledger};
use cl_01_evidence_store::KeyValueStore;

/// Digest clients register for the evidence bytes `content`.
pub fn content_hash(content: &[u8]) -> String {
    shared_types::compute_content_hash(content)
}

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn alice() -> Caller {
    Caller::new("alice", "ForensicLabMSP")
}

pub fn bob() -> Caller {
    Caller::new("bob", "PoliceMSP")
}

/// Submit and parse the JSON payload; panics on a failed response.
pub fn submit_ok<KV: KeyValueStore>(
    ledger: &Ledger<KV>,
    caller: &Caller,
    function: &str,
    values: &[&str],
) -> serde_json::Value {
    let receipt = ledger.submit(caller, function, &args(values));
    match receipt.response.payload() {
        Some(payload) => serde_json::from_slice(payload).unwrap_or(serde_json::Value::Null),
        None => panic!("{function} failed: {}", receipt.response.to_json()),
    }
}

/// Submit and return the failure kind; panics on success.
pub fn submit_err<KV: KeyValueStore>(
    ledger: &Ledger<KV>,
    caller: &Caller,
    function: &str,
    values: &[&str],
) -> cl_02_custody::ErrorKind {
    let receipt = ledger.submit(caller, function, &args(values));
    match receipt.response.failure() {
        Some(failure) => failure.kind,
        None => panic!("{function} unexpectedly succeeded"),
    }
}
