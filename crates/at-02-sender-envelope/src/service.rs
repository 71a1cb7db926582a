//! # Sender Envelope Service
//!
//! Implements `SenderEnvelopeApi` on top of an injected `DidResolver`.
//!
//! ## Verification Order
//!
//! 1. Freshness. A stale or future-dated envelope never reaches the resolver.
//! 2. Resolve `senderDid` to its Ed25519 key.
//! 3. Check the signature over `(messageId, digest)`.

use crate::domain::digest::ContentDigest;
use crate::domain::entities::{SenderFailure, SenderIdentity, VerifiedSender};
use crate::domain::envelope::{signing_payload, SenderEnvelope};
use crate::domain::freshness::check_freshness;
use crate::ports::inbound::SenderEnvelopeApi;
use crate::ports::outbound::DidResolver;
use async_trait::async_trait;
use shared_crypto::{Ed25519PublicKey, Ed25519Signature};
use shared_types::{SystemTimeSource, TimeSource};
use std::time::Duration;
use tracing::{debug, warn};
use trust_telemetry::{metric_inc, SENDER_VERIFICATIONS};

/// Sender Envelope Service.
pub struct SenderEnvelopeService<D: DidResolver, T: TimeSource = SystemTimeSource> {
    resolver: D,
    time: T,
}

impl<D: DidResolver> SenderEnvelopeService<D> {
    /// Create a service using the system clock.
    pub fn new(resolver: D) -> Self {
        Self::with_time_source(resolver, SystemTimeSource)
    }
}

impl<D: DidResolver, T: TimeSource> SenderEnvelopeService<D, T> {
    /// Create a service with an explicit clock.
    pub fn with_time_source(resolver: D, time: T) -> Self {
        Self { resolver, time }
    }

    /// The resolver this service consults.
    pub fn resolver(&self) -> &D {
        &self.resolver
    }

    /// Like `verify`, but DID resolution is bounded by `resolution_timeout`.
    ///
    /// A resolver that does not answer in time yields
    /// `SenderFailure::ResolutionTimedOut`.
    pub async fn verify_with_timeout(
        &self,
        envelope: &SenderEnvelope,
        digest: &ContentDigest,
        max_age: Duration,
        resolution_timeout: Duration,
    ) -> VerifiedSender {
        let result = self
            .check(envelope, digest, max_age, Some(resolution_timeout))
            .await;
        self.record(envelope, digest, result)
    }

    async fn check(
        &self,
        envelope: &SenderEnvelope,
        digest: &ContentDigest,
        max_age: Duration,
        resolution_timeout: Option<Duration>,
    ) -> VerifiedSender {
        let did = envelope.sender_did.clone();
        let signed_at = envelope.timestamp;

        if let Err(failure) = check_freshness(signed_at, self.time.now(), max_age) {
            return VerifiedSender::invalid(did, signed_at, false, failure);
        }

        let key = match self.resolve_key(envelope, resolution_timeout).await {
            Ok(key) => key,
            Err(failure) => return VerifiedSender::invalid(did, signed_at, false, failure),
        };

        let signature = match Ed25519Signature::from_hex(&envelope.signature) {
            Ok(signature) => signature,
            Err(_) => {
                return VerifiedSender::invalid(did, signed_at, true, SenderFailure::MalformedSignature)
            }
        };

        let payload = signing_payload(&envelope.message_id, digest);
        match key.verify(&payload, &signature) {
            Ok(()) => VerifiedSender::valid(did, signed_at),
            Err(_) => VerifiedSender::invalid(did, signed_at, true, SenderFailure::BadSignature),
        }
    }

    async fn resolve_key(
        &self,
        envelope: &SenderEnvelope,
        resolution_timeout: Option<Duration>,
    ) -> Result<Ed25519PublicKey, SenderFailure> {
        let resolution = self.resolver.resolve(&envelope.sender_did);
        let outcome = match resolution_timeout {
            Some(limit) => tokio::time::timeout(limit, resolution)
                .await
                .map_err(|_| SenderFailure::ResolutionTimedOut)?,
            None => resolution.await,
        };
        outcome.map_err(SenderFailure::Unresolved)
    }

    fn record(
        &self,
        envelope: &SenderEnvelope,
        digest: &ContentDigest,
        result: VerifiedSender,
    ) -> VerifiedSender {
        match &result.failure {
            None => debug!(
                did = %result.did,
                message_id = %envelope.message_id,
                "Sender envelope verified"
            ),
            Some(failure) => warn!(
                did = %result.did,
                message_id = %envelope.message_id,
                content_digest = %digest,
                failure = %failure,
                "Sender envelope rejected"
            ),
        }
        metric_inc!(SENDER_VERIFICATIONS, &[result.outcome_label()]);
        result
    }
}

#[async_trait]
impl<D: DidResolver, T: TimeSource> SenderEnvelopeApi for SenderEnvelopeService<D, T> {
    fn sign(
        &self,
        message_id: &str,
        digest: &ContentDigest,
        identity: &SenderIdentity,
    ) -> SenderEnvelope {
        SenderEnvelope::sign(message_id, digest, identity, self.time.now())
    }

    async fn verify(
        &self,
        envelope: &SenderEnvelope,
        digest: &ContentDigest,
        max_age: Duration,
    ) -> VerifiedSender {
        let result = self.check(envelope, digest, max_age, None).await;
        self.record(envelope, digest, result)
    }
}
