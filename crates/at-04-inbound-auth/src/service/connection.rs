//! # Trusted Connection
//!
//! A connection to a remote agent that passed the trust gate, plus the
//! snapshot that pass produced. Snapshots are never edited: re-verification
//! and response checks swap in a new `Arc<TrustSnapshot>`.
//!
//! The agent record and its snapshot sit behind one lock, so readers never
//! see a record paired with a snapshot taken from a different record.

use crate::domain::errors::ConnectionError;
use at_01_trust_gate::{
    AgentRecord, AgentRegistry, TrustGateApi, TrustGateError, TrustGatePolicy, TrustGateService,
    TrustSnapshot,
};
use at_02_sender_envelope::{self as sender, compute_digest, SenderEnvelopeApi, VerifiedSender};
use parking_lot::RwLock;
use shared_types::{Message, SystemTimeSource, TimeSource};
use std::sync::Arc;
use tracing::{info, warn};

/// Trusted Connection.
pub struct TrustedConnection<R: AgentRegistry, T: TimeSource = SystemTimeSource> {
    gate: Arc<TrustGateService<R, T>>,
    policy: TrustGatePolicy,
    state: RwLock<ConnectionState>,
}

struct ConnectionState {
    agent: AgentRecord,
    snapshot: Arc<TrustSnapshot>,
}

impl<R: AgentRegistry, T: TimeSource> TrustedConnection<R, T> {
    /// Run the gate for `agent` and, if it passes, open the connection.
    pub async fn establish(
        gate: Arc<TrustGateService<R, T>>,
        agent: AgentRecord,
        policy: TrustGatePolicy,
    ) -> Result<Self, TrustGateError> {
        let snapshot = gate.verify_preconditions(&agent, &policy).await?;
        info!(
            did = %agent.did,
            endpoint = %agent.endpoint,
            trust_score = ?snapshot.trust_score,
            "Trusted connection established"
        );

        Ok(Self {
            gate,
            policy,
            state: RwLock::new(ConnectionState {
                agent,
                snapshot: Arc::new(snapshot),
            }),
        })
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<TrustSnapshot> {
        self.state.read().snapshot.clone()
    }

    /// The agent record the current snapshot was taken from.
    pub fn agent(&self) -> AgentRecord {
        self.state.read().agent.clone()
    }

    /// Record and snapshot, read together.
    pub fn current(&self) -> (AgentRecord, Arc<TrustSnapshot>) {
        let state = self.state.read();
        (state.agent.clone(), state.snapshot.clone())
    }

    pub fn policy(&self) -> &TrustGatePolicy {
        &self.policy
    }

    /// Fetch a fresh record from the registry and run the gate again.
    ///
    /// On success the record and snapshot are replaced together. On failure
    /// both are left as they were.
    pub async fn reverify(&self) -> Result<Arc<TrustSnapshot>, ConnectionError> {
        let did = self.state.read().agent.did.clone();

        let fresh = self
            .gate
            .registry()
            .get_agent(&did)
            .await
            .map_err(|e| {
                warn!(did = %did, error = %e, "Could not refresh agent record");
                ConnectionError::Refresh(e)
            })?;

        let snapshot = Arc::new(self.gate.verify_preconditions(&fresh, &self.policy).await?);

        *self.state.write() = ConnectionState {
            agent: fresh,
            snapshot: snapshot.clone(),
        };
        info!(did = %did, trust_score = ?snapshot.trust_score, "Trusted connection re-verified");
        Ok(snapshot)
    }

    /// Record whether a response on this connection was authentically sent
    /// by the connected agent.
    pub fn record_response_verification(&self, verified: &VerifiedSender) -> Arc<TrustSnapshot> {
        let mut state = self.state.write();
        let expected = &state.agent.did;
        let authentic = verified.signature_valid && verified.did == *expected;
        if !authentic {
            warn!(
                did = %expected,
                claimed = %verified.did,
                signature_valid = verified.signature_valid,
                "Response not verified"
            );
        }

        let next = Arc::new(state.snapshot.with_response_verified(authentic));
        state.snapshot = next.clone();
        next
    }

    /// Verify the sender envelope on `response` and record the outcome.
    ///
    /// A response without an envelope, or with a malformed one, is recorded
    /// as unverified and yields `None`.
    pub async fn verify_response<S: SenderEnvelopeApi>(
        &self,
        verifier: &S,
        response: &Message,
    ) -> Option<VerifiedSender> {
        let Some(envelope) = sender::extract(&response.metadata) else {
            self.mark_unverified(&response.message_id);
            return None;
        };
        if envelope.message_id != response.message_id {
            self.mark_unverified(&response.message_id);
            return None;
        }

        let digest = compute_digest(&response.parts);
        let verified = verifier
            .verify(&envelope, &digest, self.policy.max_message_age)
            .await;
        self.record_response_verification(&verified);
        Some(verified)
    }

    fn mark_unverified(&self, message_id: &str) {
        warn!(message_id = %message_id, "Response carries no usable sender envelope");
        let mut state = self.state.write();
        state.snapshot = Arc::new(state.snapshot.with_response_verified(false));
    }
}
