//! # Trust Gate Errors
//!
//! Terminal gate failures and the registry failures they wrap.

use shared_types::Did;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by an `AgentRegistry`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry has no entry for the DID
    #[error("agent not found: {0}")]
    NotFound(Did),

    /// Transport-level failure talking to the registry
    #[error("registry unreachable: {0}")]
    Network(String),

    /// The registry answered but the DID document is unusable
    #[error("malformed DID document: {0}")]
    MalformedDocument(String),

    /// The registry did not answer in time
    #[error("registry request timed out")]
    Timeout,
}

/// Terminal outcome of a failed gate run.
///
/// Never retried by the gate. The caller aborts connection establishment.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrustGateError {
    /// Identity stage: the registry could not resolve the agent's DID
    #[error("could not resolve DID {did}")]
    DidResolutionFailed {
        did: Did,
        #[source]
        source: RegistryError,
    },

    /// Liveness stage: the agent is not live, or the probe failed
    #[error("agent {did} is not live")]
    AgentNotLive {
        did: Did,
        #[source]
        source: Option<RegistryError>,
    },

    /// Reputation stage: score unknown or below the policy minimum
    #[error("trust score {actual:?} below threshold {threshold}")]
    TrustScoreBelowThreshold { actual: Option<f64>, threshold: f64 },

    /// The caller cancelled the run
    #[error("trust gate cancelled")]
    Cancelled,

    /// The run exceeded its deadline
    #[error("trust gate timed out after {0:?}")]
    TimedOut(Duration),
}

impl TrustGateError {
    /// Metric label for the stage that produced the error.
    pub fn stage_label(&self) -> &'static str {
        match self {
            Self::DidResolutionFailed { .. } => "identity",
            Self::AgentNotLive { .. } => "liveness",
            Self::TrustScoreBelowThreshold { .. } => "reputation",
            Self::Cancelled | Self::TimedOut(_) => "pipeline",
        }
    }

    /// Metric label for the outcome.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::TimedOut(_) => "timed_out",
            _ => "failed",
        }
    }
}
