//! # Gate Stages
//!
//! The checks that need no registry call. The service runs the network
//! stages itself and defers to these for the rest.

use crate::domain::entities::{AgentRecord, TrustGatePolicy};
use crate::domain::errors::TrustGateError;

/// The three gate stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStage {
    /// DID resolution.
    Identity,
    /// Cached or probed liveness.
    Liveness,
    /// Trust score against the policy minimum.
    Reputation,
}

impl GateStage {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Liveness => "liveness",
            Self::Reputation => "reputation",
        }
    }
}

/// Liveness stage when no probe is configured.
///
/// Fails only when the policy requires liveness and the cached flag says the
/// agent is down. A cached "live" is trusted as is.
pub fn check_cached_liveness(
    agent: &AgentRecord,
    policy: &TrustGatePolicy,
) -> Result<(), TrustGateError> {
    if policy.require_live && !agent.is_live {
        return Err(TrustGateError::AgentNotLive {
            did: agent.did.clone(),
            source: None,
        });
    }
    Ok(())
}

/// Reputation stage.
///
/// Disabled when `min_trust_score <= 0`. Otherwise an unknown score fails the
/// same way a low one does.
pub fn check_reputation(
    agent: &AgentRecord,
    policy: &TrustGatePolicy,
) -> Result<(), TrustGateError> {
    if policy.min_trust_score <= 0.0 {
        return Ok(());
    }

    match agent.trust_score {
        Some(score) if score >= policy.min_trust_score => Ok(()),
        actual => Err(TrustGateError::TrustScoreBelowThreshold {
            actual,
            threshold: policy.min_trust_score,
        }),
    }
}
