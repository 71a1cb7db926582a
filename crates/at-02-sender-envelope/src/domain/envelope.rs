//! Sender envelope wire format.

use crate::domain::canonical::canonicalize;
use crate::domain::digest::ContentDigest;
use crate::domain::entities::SenderIdentity;
use crate::domain::errors::EnvelopeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{Did, MessageMetadata};

/// Metadata key carrying the sender envelope.
pub const SENDER_ENVELOPE_KEY: &str = "agentTrust.senderEnvelope";

/// Signed claim that `sender_did` produced message `message_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderEnvelope {
    /// Claimed sender.
    pub sender_did: Did,
    /// Lowercase hex Ed25519 signature over the signing payload.
    pub signature: String,
    /// When the envelope was signed (RFC 3339, UTC).
    pub timestamp: DateTime<Utc>,
    /// The message this envelope covers.
    pub message_id: String,
}

impl SenderEnvelope {
    /// Sign `(message_id, digest)` as `identity`.
    pub fn sign(
        message_id: &str,
        digest: &ContentDigest,
        identity: &SenderIdentity,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let signature = identity.key.sign(&signing_payload(message_id, digest));
        Self {
            sender_did: identity.did.clone(),
            signature: signature.to_hex(),
            timestamp,
            message_id: message_id.to_owned(),
        }
    }

    /// Place this envelope under [`SENDER_ENVELOPE_KEY`], replacing any
    /// envelope already there.
    pub fn attach(&self, metadata: &mut MessageMetadata) -> Result<(), EnvelopeError> {
        let value =
            serde_json::to_value(self).map_err(|e| EnvelopeError::Encoding(e.to_string()))?;
        metadata.insert(SENDER_ENVELOPE_KEY.to_owned(), value);
        Ok(())
    }
}

/// Bytes the sender signs: canonical `{"contentDigest":..,"messageId":..}`.
pub fn signing_payload(message_id: &str, digest: &ContentDigest) -> Vec<u8> {
    canonicalize(&json!({
        "contentDigest": digest.as_str(),
        "messageId": message_id,
    }))
    .into_bytes()
}

/// Strict decode of an envelope value.
pub fn decode(value: &Value) -> Result<SenderEnvelope, EnvelopeError> {
    SenderEnvelope::deserialize(value).map_err(|e| EnvelopeError::Malformed(e.to_string()))
}

/// The envelope in `metadata`, if one is present and well-formed.
pub fn extract(metadata: &MessageMetadata) -> Option<SenderEnvelope> {
    extract_checked(metadata).ok().flatten()
}

/// Like [`extract`] but tells "absent" apart from "malformed".
pub fn extract_checked(metadata: &MessageMetadata) -> Result<Option<SenderEnvelope>, EnvelopeError> {
    metadata.get(SENDER_ENVELOPE_KEY).map(decode).transpose()
}
