use crate::domain::entities::TrustGatePolicy;
use crate::ports::outbound::PolicyProvider;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// StaticPolicyProvider - Policy built in code
// ============================================================================

/// Policy provider returning a fixed policy.
///
/// Useful for tests and embedded use. For deployments, use `TomlPolicyProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticPolicyProvider {
    policy: TrustGatePolicy,
}

impl StaticPolicyProvider {
    /// Provide `policy` unchanged.
    #[must_use]
    pub fn new(policy: TrustGatePolicy) -> Self {
        Self { policy }
    }
}

impl PolicyProvider for StaticPolicyProvider {
    fn policy(&self) -> TrustGatePolicy {
        self.policy.clone()
    }
}

// ============================================================================
// TomlPolicyProvider - Policy loaded from a config file
// ============================================================================

/// Configuration file structure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    trust_gate: TrustGateConfigFile,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TrustGateConfigFile {
    verify_identity: Option<bool>,
    liveness_check_before_send: Option<bool>,
    min_trust_score: Option<f64>,
    require_live: Option<bool>,
    max_message_age_secs: Option<u64>,
}

/// TOML-based policy provider.
///
/// # Config File Format
///
/// ```toml
/// [trust_gate]
/// verify_identity = true
/// liveness_check_before_send = false
/// min_trust_score = 50.0
/// require_live = true
/// max_message_age_secs = 300
/// ```
///
/// Absent keys take the `TrustGatePolicy::default()` values.
#[derive(Debug, Clone)]
pub struct TomlPolicyProvider {
    policy: TrustGatePolicy,
}

impl TomlPolicyProvider {
    /// Load the policy from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse the policy from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let defaults = TrustGatePolicy::default();
        let tg = file.trust_gate;

        let min_trust_score = tg.min_trust_score.unwrap_or(defaults.min_trust_score);
        if !min_trust_score.is_finite() || min_trust_score < 0.0 {
            return Err(ConfigError::Invalid {
                key: "trust_gate.min_trust_score",
                reason: format!("must be a finite number >= 0, got {min_trust_score}"),
            });
        }

        let policy = TrustGatePolicy {
            verify_identity: tg.verify_identity.unwrap_or(defaults.verify_identity),
            liveness_check_before_send: tg
                .liveness_check_before_send
                .unwrap_or(defaults.liveness_check_before_send),
            min_trust_score,
            require_live: tg.require_live.unwrap_or(defaults.require_live),
            max_message_age: tg
                .max_message_age_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_message_age),
        };

        Ok(Self { policy })
    }
}

impl PolicyProvider for TomlPolicyProvider {
    fn policy(&self) -> TrustGatePolicy {
        self.policy.clone()
    }
}

/// Errors that can occur during config loading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },

    /// TOML parsing error, including unknown keys.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A value parsed but is out of range.
    #[error("Invalid value for {key}: {reason}")]
    Invalid {
        /// Dotted key path.
        key: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
