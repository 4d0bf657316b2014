//! # Custody Telemetry
//!
//! Logging and metrics for the custody ledger.
//!
//! ## Components
//!
//! - **Logs**: `tracing` events rendered as pretty text or JSON lines
//! - **Metrics**: Prometheus counters and histograms in a private registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use custody_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // Logs and metrics are now being collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `custody-ledger` | Service name on the root `service` span |
//! | `CL_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `CL_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `CL_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, NOTIFICATIONS_PUBLISHED,
    TRANSACTIONS_TOTAL, TRANSACTION_DURATION, WRITES_COMMITTED,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install log subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Initialize metrics first (synchronous)
    let metrics_handle = register_metrics()?;

    logging::init_logging(&config)?;
    let service = logging::service_span(&config).entered();

    Ok(TelemetryGuard {
        _service: service,
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
///
/// Holds the root `service` span open on the thread that created it.
pub struct TelemetryGuard {
    _service: tracing::span::EnteredSpan,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!("Shutting down telemetry");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
