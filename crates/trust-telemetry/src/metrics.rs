//! Prometheus metrics for the Agent-Trust components.
//!
//! All metrics follow the naming convention: `agent_trust_<area>_<metric>`
//!
//! ## Metric Types
//!
//! - **Counter**: gate outcomes and envelope verifications, labelled by result
//! - **Gauge**: request scopes currently holding verification results

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// TrustGate outcomes by stage
    pub static ref TRUST_GATE_OUTCOMES: CounterVec = CounterVec::new(
        Opts::new("agent_trust_gate_outcomes_total", "TrustGate results by stage"),
        &["stage", "outcome"]  // stage: identity/liveness/reputation/complete, outcome: passed/failed/cancelled/timed_out
    ).expect("metric creation failed");

    /// Layer 1 sender envelope verifications
    pub static ref SENDER_VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("agent_trust_sender_verifications_total", "Sender envelope verifications"),
        &["outcome"]  // outcome: valid/stale/from_future/unresolved/timed_out/malformed_signature/bad_signature
    ).expect("metric creation failed");

    /// Layer 2 delegation envelope verifications
    pub static ref DELEGATION_VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("agent_trust_delegation_verifications_total", "Delegation envelope verifications"),
        &["outcome"]  // outcome: valid/expired/delegate_mismatch/signer_mismatch/unrecoverable
    ).expect("metric creation failed");

    /// Request scopes currently alive
    pub static ref ACTIVE_REQUEST_SCOPES: Gauge = Gauge::new(
        "agent_trust_active_request_scopes",
        "Inbound requests currently holding verification results"
    ).expect("metric creation failed");
}

/// Handle for the metrics registry
pub struct MetricsHandle {
    registry: Arc<Registry>,
}

impl MetricsHandle {
    /// The registry the metrics were registered with.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; metrics that are already registered are kept.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRUST_GATE_OUTCOMES.clone()),
        Box::new(SENDER_VERIFICATIONS.clone()),
        Box::new(DELEGATION_VERIFICATIONS.clone()),
        Box::new(ACTIVE_REQUEST_SCOPES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: Arc::new(REGISTRY.clone()),
    })
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics_is_idempotent() {
        assert!(register_metrics().is_ok());
        assert!(register_metrics().is_ok());
    }

    #[test]
    fn test_counter_increment() {
        TRUST_GATE_OUTCOMES
            .with_label_values(&["reputation", "failed"])
            .inc();
        assert!(
            TRUST_GATE_OUTCOMES
                .with_label_values(&["reputation", "failed"])
                .get()
                >= 1.0
        );
    }

    #[test]
    fn test_encoded_output_names_metrics() {
        register_metrics().unwrap();
        DELEGATION_VERIFICATIONS.with_label_values(&["expired"]).inc();
        let text = encode_metrics().unwrap();
        assert!(text.contains("agent_trust_delegation_verifications_total"));
    }
}
