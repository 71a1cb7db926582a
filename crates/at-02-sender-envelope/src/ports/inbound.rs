//! # Inbound Ports (Driving Ports / API)

use crate::domain::digest::ContentDigest;
use crate::domain::entities::{SenderIdentity, VerifiedSender};
use crate::domain::envelope::SenderEnvelope;
use async_trait::async_trait;
use std::time::Duration;

/// Layer 1 signing and verification.
#[async_trait]
pub trait SenderEnvelopeApi: Send + Sync {
    /// Sign `(message_id, digest)` as `identity`, stamped with the current time.
    fn sign(
        &self,
        message_id: &str,
        digest: &ContentDigest,
        identity: &SenderIdentity,
    ) -> SenderEnvelope;

    /// Verify `envelope` against a digest the caller recomputed from the
    /// message it actually received.
    ///
    /// Never fails: the outcome, good or bad, is in the returned record.
    async fn verify(
        &self,
        envelope: &SenderEnvelope,
        digest: &ContentDigest,
        max_age: Duration,
    ) -> VerifiedSender;
}
