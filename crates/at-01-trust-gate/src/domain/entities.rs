//! # Domain Entities
//!
//! Core types for connection-time gating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::Did;
use std::time::Duration;

/// Default `TrustGatePolicy::max_message_age`.
pub const DEFAULT_MAX_MESSAGE_AGE: Duration = Duration::from_secs(300);

/// Registry view of a remote agent.
///
/// Owned by the registry. The gate only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    /// The agent's DID.
    pub did: Did,
    /// Where the agent is reached.
    pub endpoint: String,
    /// Registry reputation, if the registry has one.
    #[serde(default)]
    pub trust_score: Option<f64>,
    /// Cached liveness as last observed by the registry.
    #[serde(default)]
    pub is_live: bool,
    /// When liveness was last probed.
    #[serde(default)]
    pub last_liveness_check: Option<DateTime<Utc>>,
    /// Registry badge for agents with a long clean history.
    #[serde(default)]
    pub is_battle_tested: bool,
}

impl AgentRecord {
    /// A record with no score, not live, not battle tested.
    pub fn new(did: Did, endpoint: impl Into<String>) -> Self {
        Self {
            did,
            endpoint: endpoint.into(),
            trust_score: None,
            is_live: false,
            last_liveness_check: None,
            is_battle_tested: false,
        }
    }

    /// Set the trust score.
    #[must_use]
    pub fn with_trust_score(mut self, score: f64) -> Self {
        self.trust_score = Some(score);
        self
    }

    /// Set cached liveness.
    #[must_use]
    pub fn with_live(mut self, is_live: bool) -> Self {
        self.is_live = is_live;
        self
    }

    /// Set the battle-tested badge.
    #[must_use]
    pub fn with_battle_tested(mut self, battle_tested: bool) -> Self {
        self.is_battle_tested = battle_tested;
        self
    }
}

/// Result of a successful gate pass.
///
/// Immutable. Re-verification produces a new snapshot that replaces the old
/// one rather than editing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustSnapshot {
    /// Whether the identity stage ran and passed.
    pub did_verified: bool,
    /// Liveness as recorded on the agent.
    pub is_live: bool,
    /// Trust score as recorded on the agent.
    pub trust_score: Option<f64>,
    /// Battle-tested badge as recorded on the agent.
    pub is_battle_tested: bool,
    /// Whether a response on this connection carried a valid sender
    /// envelope from the expected agent. `None` until one is checked.
    pub response_verified: Option<bool>,
    /// When the gate passed.
    pub verified_at: DateTime<Utc>,
}

impl TrustSnapshot {
    /// Snapshot of `agent` as of `verified_at`.
    pub fn from_agent(agent: &AgentRecord, did_verified: bool, verified_at: DateTime<Utc>) -> Self {
        Self {
            did_verified,
            is_live: agent.is_live,
            trust_score: agent.trust_score,
            is_battle_tested: agent.is_battle_tested,
            response_verified: None,
            verified_at,
        }
    }

    /// A copy with `response_verified` set.
    #[must_use]
    pub fn with_response_verified(&self, verified: bool) -> Self {
        Self {
            response_verified: Some(verified),
            ..self.clone()
        }
    }
}

/// Per-client gating policy.
#[derive(Debug, Clone, PartialEq)]
pub struct TrustGatePolicy {
    /// Resolve the agent's DID before connecting.
    pub verify_identity: bool,
    /// Probe liveness over the network before connecting.
    pub liveness_check_before_send: bool,
    /// Minimum trust score; `0` disables the reputation stage.
    pub min_trust_score: f64,
    /// Refuse agents whose cached status is not live.
    pub require_live: bool,
    /// Oldest sender envelope accepted on this connection.
    pub max_message_age: Duration,
}

impl Default for TrustGatePolicy {
    fn default() -> Self {
        Self {
            verify_identity: true,
            liveness_check_before_send: false,
            min_trust_score: 0.0,
            require_live: true,
            max_message_age: DEFAULT_MAX_MESSAGE_AGE,
        }
    }
}
