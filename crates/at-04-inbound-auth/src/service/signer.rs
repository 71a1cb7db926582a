//! Outbound signing: digest, sign, attach.

use crate::domain::errors::OutboundError;
use at_02_sender_envelope::{compute_digest, SenderEnvelope, SenderEnvelopeApi, SenderIdentity};
use at_03_delegation::DelegationEnvelope;
use shared_types::{Did, Message};
use tracing::debug;

/// Signs outgoing messages as one agent identity.
pub struct OutboundSigner<S: SenderEnvelopeApi> {
    api: S,
    identity: SenderIdentity,
}

impl<S: SenderEnvelopeApi> OutboundSigner<S> {
    pub fn new(api: S, identity: SenderIdentity) -> Self {
        Self { api, identity }
    }

    /// The DID outgoing messages are signed as.
    pub fn did(&self) -> &Did {
        &self.identity.did
    }

    /// Attach a sender envelope covering `message`'s id and parts.
    ///
    /// Parts must not change after signing.
    pub fn sign(&self, message: &mut Message) -> Result<SenderEnvelope, OutboundError> {
        let digest = compute_digest(&message.parts);
        let envelope = self.api.sign(&message.message_id, &digest, &self.identity);
        envelope.attach(&mut message.metadata)?;
        debug!(
            did = %self.identity.did,
            message_id = %message.message_id,
            content_digest = %digest,
            "Signed outbound message"
        );
        Ok(envelope)
    }

    /// Like [`sign`](Self::sign), also forwarding a user's delegation.
    pub fn sign_with_delegation(
        &self,
        message: &mut Message,
        delegation: &DelegationEnvelope,
    ) -> Result<SenderEnvelope, OutboundError> {
        delegation.attach(&mut message.metadata)?;
        self.sign(message)
    }
}
