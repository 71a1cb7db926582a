//! # Decentralized Identifiers
//!
//! `did:<method>:<method-specific-id>` strings and the subset of the DID
//! document model the trust components read.

use crate::errors::DidError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verification method types that carry an Ed25519 agent key.
pub const ED25519_METHOD_TYPES: &[&str] = &["Ed25519VerificationKey2018", "Ed25519VerificationKey2020"];

/// A syntactically valid DID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Did(String);

impl Did {
    /// Parse and validate a DID string.
    pub fn parse(input: impl Into<String>) -> Result<Self, DidError> {
        let input = input.into();
        let rest = input
            .strip_prefix("did:")
            .ok_or_else(|| DidError::MissingScheme(input.clone()))?;

        let (method, identifier) = match rest.split_once(':') {
            Some(parts) => parts,
            None => return Err(DidError::EmptyIdentifier(input)),
        };

        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(DidError::InvalidMethod(input));
        }
        if identifier.is_empty() {
            return Err(DidError::EmptyIdentifier(input));
        }

        Ok(Self(input))
    }

    /// The full DID string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The DID method (`key`, `web`, ...).
    pub fn method(&self) -> &str {
        // Validated in `parse`: "did:" + method + ":" + id
        self.0[4..].split(':').next().unwrap_or_default()
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Did {
    type Err = DidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Did {
    type Error = DidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Did> for String {
    fn from(did: Did) -> Self {
        did.0
    }
}

/// A resolved DID document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    /// The DID this document describes.
    pub id: Did,
    /// Keys the subject can prove control of.
    #[serde(default)]
    pub verification_method: Vec<VerificationMethod>,
    /// Service endpoints advertised by the subject.
    #[serde(default)]
    pub service: Vec<ServiceEndpoint>,
}

impl DidDocument {
    /// Hex public key of the first Ed25519 verification method, if any.
    pub fn ed25519_public_key_hex(&self) -> Option<&str> {
        self.verification_method
            .iter()
            .filter(|vm| ED25519_METHOD_TYPES.contains(&vm.method_type.as_str()))
            .find_map(|vm| vm.public_key_hex.as_deref())
    }
}

/// A single verification method in a DID document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// Method id, usually `<did>#<fragment>`.
    pub id: String,
    /// Key type, e.g. `Ed25519VerificationKey2020`.
    #[serde(rename = "type")]
    pub method_type: String,
    /// DID that controls this key.
    pub controller: String,
    /// Raw public key as hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_hex: Option<String>,
}

/// A service endpoint in a DID document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEndpoint {
    /// Service id.
    pub id: String,
    /// Service type, e.g. `AgentEndpoint`.
    #[serde(rename = "type")]
    pub service_type: String,
    /// Where to reach the service.
    pub service_endpoint: String,
}
