//! # Trust Gate Service
//!
//! Application service that implements `TrustGateApi` against an injected
//! `AgentRegistry` and `TimeSource`.

use crate::domain::entities::{AgentRecord, TrustGatePolicy, TrustSnapshot};
use crate::domain::errors::TrustGateError;
use crate::domain::stages::{self, GateStage};
use crate::ports::inbound::TrustGateApi;
use crate::ports::outbound::AgentRegistry;
use async_trait::async_trait;
use shared_types::{SystemTimeSource, TimeSource};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use trust_telemetry::{metric_inc, TRUST_GATE_OUTCOMES};

/// Trust Gate Service.
///
/// Holds no mutable state: every run reads the registry afresh.
pub struct TrustGateService<R: AgentRegistry, T: TimeSource = SystemTimeSource> {
    registry: R,
    time: T,
}

impl<R: AgentRegistry> TrustGateService<R> {
    /// Create a service stamping snapshots with the system clock.
    pub fn new(registry: R) -> Self {
        Self::with_time_source(registry, SystemTimeSource)
    }
}

impl<R: AgentRegistry, T: TimeSource> TrustGateService<R, T> {
    /// Create a service with an explicit clock.
    pub fn with_time_source(registry: R, time: T) -> Self {
        Self { registry, time }
    }

    /// The registry this service consults.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Run the gate, giving up as soon as `token` is cancelled.
    ///
    /// The in-flight registry call is dropped on cancellation.
    pub async fn verify_preconditions_cancellable(
        &self,
        agent: &AgentRecord,
        policy: &TrustGatePolicy,
        token: &CancellationToken,
    ) -> Result<TrustSnapshot, TrustGateError> {
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(self.abandoned(agent, TrustGateError::Cancelled)),
            result = self.verify_preconditions(agent, policy) => result,
        }
    }

    /// Run the gate with a deadline.
    pub async fn verify_preconditions_with_timeout(
        &self,
        agent: &AgentRecord,
        policy: &TrustGatePolicy,
        timeout: Duration,
    ) -> Result<TrustSnapshot, TrustGateError> {
        match tokio::time::timeout(timeout, self.verify_preconditions(agent, policy)).await {
            Ok(result) => result,
            Err(_) => Err(self.abandoned(agent, TrustGateError::TimedOut(timeout))),
        }
    }

    fn abandoned(&self, agent: &AgentRecord, error: TrustGateError) -> TrustGateError {
        warn!(did = %agent.did, error = %error, "Trust gate abandoned");
        metric_inc!(
            TRUST_GATE_OUTCOMES,
            &[error.stage_label(), error.outcome_label()]
        );
        error
    }

    async fn run_stages(
        &self,
        agent: &AgentRecord,
        policy: &TrustGatePolicy,
    ) -> Result<TrustSnapshot, TrustGateError> {
        let did = &agent.did;

        // 1. Identity
        if policy.verify_identity {
            debug!(did = %did, stage = GateStage::Identity.as_str(), "Resolving agent DID");
            self.registry
                .resolve_did(did)
                .await
                .map_err(|source| TrustGateError::DidResolutionFailed {
                    did: did.clone(),
                    source,
                })?;
        }

        // 2. Liveness
        debug!(
            did = %did,
            stage = GateStage::Liveness.as_str(),
            probe = policy.liveness_check_before_send,
            "Checking liveness"
        );
        if policy.liveness_check_before_send {
            match self.registry.check_liveness(did).await {
                Ok(true) => {}
                Ok(false) => {
                    return Err(TrustGateError::AgentNotLive {
                        did: did.clone(),
                        source: None,
                    })
                }
                Err(e) => {
                    return Err(TrustGateError::AgentNotLive {
                        did: did.clone(),
                        source: Some(e),
                    })
                }
            }
        } else {
            stages::check_cached_liveness(agent, policy)?;
        }

        // 3. Reputation
        debug!(
            did = %did,
            stage = GateStage::Reputation.as_str(),
            trust_score = ?agent.trust_score,
            min_trust_score = policy.min_trust_score,
            "Checking reputation"
        );
        stages::check_reputation(agent, policy)?;

        Ok(TrustSnapshot::from_agent(
            agent,
            policy.verify_identity,
            self.time.now(),
        ))
    }
}

#[async_trait]
impl<R: AgentRegistry, T: TimeSource> TrustGateApi for TrustGateService<R, T> {
    async fn verify_preconditions(
        &self,
        agent: &AgentRecord,
        policy: &TrustGatePolicy,
    ) -> Result<TrustSnapshot, TrustGateError> {
        match self.run_stages(agent, policy).await {
            Ok(snapshot) => {
                info!(
                    did = %agent.did,
                    trust_score = ?snapshot.trust_score,
                    did_verified = snapshot.did_verified,
                    "Trust gate passed"
                );
                metric_inc!(TRUST_GATE_OUTCOMES, &["complete", "passed"]);
                Ok(snapshot)
            }
            Err(error) => {
                warn!(
                    did = %agent.did,
                    stage = error.stage_label(),
                    error = %error,
                    "Trust gate refused agent"
                );
                metric_inc!(
                    TRUST_GATE_OUTCOMES,
                    &[error.stage_label(), error.outcome_label()]
                );
                Err(error)
            }
        }
    }
}
