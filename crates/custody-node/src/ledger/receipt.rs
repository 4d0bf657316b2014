use shared_bus::CustodyNotification;
use shared_types::Timestamp;

use cl_02_custody::Response;

/// Outcome of one submitted transaction.
#[derive(Debug, Clone)]
pub struct TransactionReceipt {
    pub transaction_id: String,
    /// Commit time handed to the operation.
    pub committed_at: Timestamp,
    pub response: Response,
    /// Keys written by the commit. Zero for queries and failures.
    pub writes: usize,
    /// Notifications published after the commit, in emission order.
    pub notifications: Vec<CustodyNotification>,
}

impl TransactionReceipt {
    pub fn is_committed(&self) -> bool {
        self.response.is_success()
    }
}
