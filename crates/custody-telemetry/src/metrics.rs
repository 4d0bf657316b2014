//! Prometheus metrics for the custody ledger.
//!
//! All metrics follow the naming convention: `cl_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, HistogramOpts, HistogramVec, IntCounter, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Metrics registry for this process
    pub static ref REGISTRY: Registry = Registry::new();

    /// Submitted transactions by function and outcome
    pub static ref TRANSACTIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("cl_ledger_transactions_total", "Transactions submitted to the ledger"),
        &["function", "outcome"]  // outcome: ok or an error kind
    ).expect("metric creation failed");

    /// Transaction execution time, including commit
    pub static ref TRANSACTION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "cl_ledger_transaction_duration_seconds",
            "Time spent executing and committing a transaction"
        ).buckets(exponential_buckets(0.00005, 2.0, 16).expect("valid buckets")),
        &["function"]
    ).expect("metric creation failed");

    /// Key-value writes made durable by committed transactions
    pub static ref WRITES_COMMITTED: IntCounter = IntCounter::new(
        "cl_ledger_writes_committed_total",
        "Key-value writes applied by committed transactions"
    ).expect("metric creation failed");

    /// Notifications delivered to the bus
    pub static ref NOTIFICATIONS_PUBLISHED: CounterVec = CounterVec::new(
        Opts::new("cl_bus_notifications_published_total", "Notifications published after commit"),
        &["name"]
    ).expect("metric creation failed");
}

/// Handle proving the metrics were registered.
pub struct MetricsHandle {
    _private: (),
}

/// Register all metrics with the registry.
///
/// Registering twice is not an error.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRANSACTIONS_TOTAL.clone()),
        Box::new(TRANSACTION_DURATION.clone()),
        Box::new(WRITES_COMMITTED.clone()),
        Box::new(NOTIFICATIONS_PUBLISHED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { _private: () })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: prometheus::Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start timing one `function` label of a histogram vector.
    pub fn start(histogram: &HistogramVec, function: &str) -> Self {
        Self {
            histogram: histogram.with_label_values(&[function]),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
