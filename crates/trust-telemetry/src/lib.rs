//! # Trust Telemetry
//!
//! Logging and metrics for the Agent-Trust components.
//!
//! ## Components
//!
//! - **Logs**: `tracing` events rendered by `tracing-subscriber`, pretty for
//!   development or JSON for log shippers.
//! - **Metrics**: Prometheus counters and gauges registered in a crate-local
//!   [`REGISTRY`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trust_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // Gate outcomes and envelope verifications are now logged and counted
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `agent-trust` | Service name in log records |
//! | `AT_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `AT_JSON_LOGS` | `false` | Emit JSON instead of pretty logs |
//! | `AT_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, ACTIVE_REQUEST_SCOPES,
    DELEGATION_VERIFICATIONS, REGISTRY, SENDER_VERIFICATIONS, TRUST_GATE_OUTCOMES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics_handle = register_metrics()?;
    logging::init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Convenience macro for recording a metric increment.
///
/// ```rust,ignore
/// metric_inc!(TRUST_GATE_OUTCOMES, &["identity", "failed"]);
/// ```
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
