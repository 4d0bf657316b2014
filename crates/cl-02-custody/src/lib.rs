//! # Custody State Machine (cl-02)
//!
//! Validates and applies the evidence lifecycle operations and keeps each
//! record's custody log.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Unique Key | `CreateEvidence` fails if the composite key is occupied |
//! | 2 | Append-Only Log | Each successful mutation appends exactly one event |
//! | 3 | Legal Transitions | Status moves only along the transition graph |
//! | 4 | Validate First | A rejected operation writes nothing and emits nothing |
//! | 5 | Fixed Anchor | `contentHash` is checked once at creation, never changed |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Errors, transition graph, input validation
//! - `ports/` - `CustodyApi` (inbound), transaction context and sink (outbound)
//! - `service/` - `CustodyService`, the `CustodyApi` implementation
//! - `ipc/` - Dispatch of named operations with positional string arguments
//! - `adapters/` - Static transaction context, buffering notification sink
//!
//! ## Usage
//!
//! ```ignore
//! use cl_02_custody::{ipc, CustodyDependencies, CustodyService};
//!
//! let mut service = CustodyService::new(CustodyDependencies { store, context, sink });
//! let response = ipc::invoke(&mut service, "ArchiveToCold", &args);
//! ```

pub mod adapters;
pub mod domain;
pub mod ipc;
pub mod ports;
pub mod service;

pub use adapters::{BufferedNotificationSink, PendingNotification, StaticTransactionContext};
pub use domain::{CustodyError, ErrorKind, Transition};
pub use ipc::{CustodyRequest, Failure, Response};
pub use ports::inbound::{
    CreateEvidenceRequest, CustodyApi, InvalidateEvidenceRequest, LifecycleRequest,
    TransferCustodyRequest,
};
pub use ports::outbound::{NotificationError, NotificationSink, TransactionContext};
pub use service::{CustodyDependencies, CustodyService};
