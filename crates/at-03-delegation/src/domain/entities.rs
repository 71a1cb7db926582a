//! # Domain Entities

use primitive_types::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A user's grant of authority to one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegation {
    /// Wallet address of the granting user, `0x`-prefixed hex.
    pub user_address: String,
    /// DID of the agent being authorized.
    pub delegate_did: String,
    /// What the agent may do, free-form.
    pub scope: String,
    /// Expiry in unix seconds, a full `uint256`. Accepted on the wire as a
    /// number or a decimal string; written as a number when it fits in 64
    /// bits and as a decimal string otherwise.
    #[serde(serialize_with = "serialize_exp", deserialize_with = "deserialize_exp")]
    pub exp: U256,
    /// Caller-chosen uniqueness token.
    pub nonce: String,
}

impl Delegation {
    /// Strict expiry: still valid at `exp` itself. Times before the epoch
    /// count as zero.
    pub fn expired_at(&self, now_secs: i64) -> bool {
        unix_word(now_secs) > self.exp
    }
}

/// `now_secs` as a `uint256`, negative times clamped to zero.
pub(crate) fn unix_word(now_secs: i64) -> U256 {
    u64::try_from(now_secs).map_or_else(|_| U256::zero(), U256::from)
}

/// A delegation and the user's typed-data signature over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationEnvelope {
    pub delegation: Delegation,
    /// 65-byte `r || s || v`, `0x`-prefixed hex.
    pub signature: String,
}

/// Why a delegation is not valid.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DelegationFailure {
    #[error("delegation expired")]
    Expired,

    #[error("delegation names a different agent")]
    DelegateMismatch,

    #[error("signer could not be recovered")]
    Unrecoverable,

    #[error("recovered signer is not the claimed user")]
    SignerMismatch,
}

impl DelegationFailure {
    /// Metric label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::DelegateMismatch => "delegate_mismatch",
            Self::Unrecoverable => "unrecoverable",
            Self::SignerMismatch => "signer_mismatch",
        }
    }
}

/// Outcome of verifying one delegation envelope.
///
/// Always produced. `address` is the claimed user and is only trustworthy
/// when `valid` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    pub address: String,
    pub delegated_to: String,
    pub scope: String,
    pub valid: bool,
    pub expired: bool,
    /// Address actually recovered from the signature, `0x` + lowercase hex.
    pub recovered_address: Option<String>,
    /// First failing check, if any.
    pub failure: Option<DelegationFailure>,
}

impl VerifiedUser {
    /// Metric label for this outcome.
    pub fn outcome_label(&self) -> &'static str {
        self.failure.map_or("valid", DelegationFailure::label)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExpWire {
    Number(u64),
    Text(String),
}

fn deserialize_exp<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    match ExpWire::deserialize(deserializer)? {
        ExpWire::Number(exp) => Ok(U256::from(exp)),
        ExpWire::Text(text) => parse_decimal(&text)
            .ok_or_else(|| de::Error::custom(format!("exp is not a uint256 decimal: {text:?}"))),
    }
}

fn parse_decimal(text: &str) -> Option<U256> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_dec_str(text).ok()
}

fn serialize_exp<S>(exp: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if exp.bits() <= 64 {
        serializer.serialize_u64(exp.low_u64())
    } else {
        serializer.collect_str(exp)
    }
}
