//! # Domain Entities

use crate::domain::errors::ResolveError;
use chrono::{DateTime, Utc};
use shared_crypto::Ed25519KeyPair;
use shared_types::Did;
use thiserror::Error;

/// An agent's signing identity.
#[derive(Debug)]
pub struct SenderIdentity {
    /// The DID verifiers will resolve.
    pub did: Did,
    /// The Ed25519 key published under that DID.
    pub key: Ed25519KeyPair,
}

impl SenderIdentity {
    /// Pair a DID with its key.
    pub fn new(did: Did, key: Ed25519KeyPair) -> Self {
        Self { did, key }
    }
}

/// Why a sender envelope did not verify.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SenderFailure {
    #[error("envelope older than the allowed message age")]
    Stale,

    #[error("envelope timestamp is in the future")]
    FromFuture,

    #[error("sender DID did not resolve: {0}")]
    Unresolved(ResolveError),

    #[error("sender DID resolution timed out")]
    ResolutionTimedOut,

    #[error("signature is not 64 hex-encoded bytes")]
    MalformedSignature,

    #[error("signature does not match the sender key")]
    BadSignature,
}

impl SenderFailure {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stale => "stale",
            Self::FromFuture => "from_future",
            Self::Unresolved(_) => "unresolved",
            Self::ResolutionTimedOut => "timed_out",
            Self::MalformedSignature => "malformed_signature",
            Self::BadSignature => "bad_signature",
        }
    }
}

/// Outcome of verifying one sender envelope.
///
/// Always produced, including on failure. Belongs to the inbound request it
/// was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSender {
    /// The DID the envelope claims.
    pub did: Did,
    /// The signature checked out against the resolved key.
    pub signature_valid: bool,
    /// The DID resolved to a key.
    pub did_resolved: bool,
    /// The envelope's timestamp.
    pub signed_at: DateTime<Utc>,
    /// Why verification failed, if it did.
    pub failure: Option<SenderFailure>,
}

impl VerifiedSender {
    pub(crate) fn valid(did: Did, signed_at: DateTime<Utc>) -> Self {
        Self {
            did,
            signature_valid: true,
            did_resolved: true,
            signed_at,
            failure: None,
        }
    }

    pub(crate) fn invalid(
        did: Did,
        signed_at: DateTime<Utc>,
        did_resolved: bool,
        failure: SenderFailure,
    ) -> Self {
        Self {
            did,
            signature_valid: false,
            did_resolved,
            signed_at,
            failure: Some(failure),
        }
    }

    /// Signature valid and DID resolved.
    pub fn is_authentic(&self) -> bool {
        self.signature_valid && self.did_resolved
    }

    /// Metric label for this outcome.
    pub fn outcome_label(&self) -> &'static str {
        self.failure.as_ref().map_or("valid", SenderFailure::label)
    }
}
