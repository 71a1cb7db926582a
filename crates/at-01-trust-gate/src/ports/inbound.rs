//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the trust gate.

use crate::domain::entities::{AgentRecord, TrustGatePolicy, TrustSnapshot};
use crate::domain::errors::TrustGateError;
use async_trait::async_trait;

/// Primary Trust Gate API.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait TrustGateApi: Send + Sync {
    /// Run identity, liveness and reputation checks against `agent`.
    ///
    /// Stages run in order and stop at the first failure. A success yields a
    /// fresh snapshot stamped with the current time.
    ///
    /// # Errors
    /// * `DidResolutionFailed` - identity stage enabled and resolution failed
    /// * `AgentNotLive` - probe said no or failed, or cached status is down
    ///   and `require_live` is set
    /// * `TrustScoreBelowThreshold` - score unknown or below a positive minimum
    async fn verify_preconditions(
        &self,
        agent: &AgentRecord,
        policy: &TrustGatePolicy,
    ) -> Result<TrustSnapshot, TrustGateError>;
}
