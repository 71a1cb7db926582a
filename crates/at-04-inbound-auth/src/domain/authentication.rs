//! Outcome of authenticating one inbound message.

use at_02_sender_envelope::{EnvelopeError, VerifiedSender};
use at_03_delegation::{DelegationError, VerifiedUser};
use thiserror::Error;

/// An envelope was present in metadata but could not be decoded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedEnvelope {
    #[error("sender envelope: {0}")]
    Sender(#[source] EnvelopeError),

    #[error("delegation envelope: {0}")]
    Delegation(#[source] DelegationError),
}

/// Both layers' results for one message.
///
/// `None` means the envelope was absent or malformed; malformed envelopes are
/// also listed in `malformed`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundAuthentication {
    pub sender: Option<VerifiedSender>,
    pub user: Option<VerifiedUser>,
    pub malformed: Vec<MalformedEnvelope>,
}

impl InboundAuthentication {
    /// The sender envelope verified.
    pub fn sender_authentic(&self) -> bool {
        self.sender.as_ref().is_some_and(VerifiedSender::is_authentic)
    }

    /// The delegation verified.
    pub fn user_authorized(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.valid)
    }
}
