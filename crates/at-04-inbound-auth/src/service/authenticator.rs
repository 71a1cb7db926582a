//! # Inbound Authenticator
//!
//! Runs Layer 1 and Layer 2 over an inbound message.
//!
//! ## Delegate Binding
//!
//! The delegation must name the calling agent. The calling agent is the one
//! the transport reports, or failing that the sender whose envelope just
//! verified. With neither, the delegate check is skipped.

use crate::adapters::scopes::{ScopeGuard, VerificationScopes};
use crate::domain::authentication::{InboundAuthentication, MalformedEnvelope};
use crate::domain::context::{RequestContext, RequestId};
use crate::domain::errors::ScopeError;
use crate::ports::inbound::InboundAuthApi;
use async_trait::async_trait;
use at_02_sender_envelope::{
    self as sender, compute_digest, SenderEnvelope, SenderEnvelopeApi, VerifiedSender,
};
use at_03_delegation::{self as delegation, DelegationApi};
use shared_types::{Did, Message};
use std::time::Duration;
use tracing::{debug, warn};

/// Inbound Authenticator.
pub struct InboundAuthenticator<S: SenderEnvelopeApi, U: DelegationApi> {
    senders: S,
    delegations: U,
    max_message_age: Duration,
}

impl<S: SenderEnvelopeApi, U: DelegationApi> InboundAuthenticator<S, U> {
    /// Accept sender envelopes no older than `max_message_age`.
    pub fn new(senders: S, delegations: U, max_message_age: Duration) -> Self {
        Self {
            senders,
            delegations,
            max_message_age,
        }
    }

    pub fn max_message_age(&self) -> Duration {
        self.max_message_age
    }

    /// Authenticate `message` and hold the outcome in `scopes` under
    /// `request_id` until the returned guard drops.
    pub async fn authenticate_scoped(
        &self,
        scopes: &VerificationScopes,
        request_id: RequestId,
        message: &Message,
        calling_agent: Option<&Did>,
    ) -> Result<(ScopeGuard, Vec<MalformedEnvelope>), ScopeError> {
        let mut auth = self.authenticate(message, calling_agent).await;
        let malformed = std::mem::take(&mut auth.malformed);
        let guard = scopes.enter(RequestContext::from_authentication(request_id, auth))?;
        Ok((guard, malformed))
    }

    async fn verify_sender(
        &self,
        message: &Message,
        envelope: SenderEnvelope,
    ) -> VerifiedSender {
        // Bind to the id of the message actually received. An envelope lifted
        // from another message then fails the signature check.
        let bound = SenderEnvelope {
            message_id: message.message_id.clone(),
            ..envelope
        };
        let digest = compute_digest(&message.parts);
        self.senders
            .verify(&bound, &digest, self.max_message_age)
            .await
    }
}

#[async_trait]
impl<S: SenderEnvelopeApi, U: DelegationApi> InboundAuthApi for InboundAuthenticator<S, U> {
    async fn authenticate(
        &self,
        message: &Message,
        calling_agent: Option<&Did>,
    ) -> InboundAuthentication {
        let mut auth = InboundAuthentication::default();

        match sender::extract_checked(&message.metadata) {
            Ok(Some(envelope)) => {
                auth.sender = Some(self.verify_sender(message, envelope).await);
            }
            Ok(None) => debug!(message_id = %message.message_id, "No sender envelope"),
            Err(e) => {
                warn!(message_id = %message.message_id, error = %e, "Malformed sender envelope");
                auth.malformed.push(MalformedEnvelope::Sender(e));
            }
        }

        let expected = calling_agent
            .or_else(|| {
                auth.sender
                    .as_ref()
                    .filter(|s| s.is_authentic())
                    .map(|s| &s.did)
            })
            .map(Did::as_str);

        match delegation::extract_checked(&message.metadata) {
            Ok(Some(envelope)) => {
                auth.user = Some(self.delegations.verify(&envelope, expected));
            }
            Ok(None) => debug!(message_id = %message.message_id, "No delegation envelope"),
            Err(e) => {
                warn!(message_id = %message.message_id, error = %e, "Malformed delegation envelope");
                auth.malformed.push(MalformedEnvelope::Delegation(e));
            }
        }

        auth
    }
}
