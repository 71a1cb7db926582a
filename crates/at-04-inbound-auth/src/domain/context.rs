//! # Request Context
//!
//! Verification results travel with the request they were computed for,
//! either attached directly to a [`RequestContext`] or held in a
//! `VerificationScopes` arena under the request's [`RequestId`].

use crate::domain::authentication::InboundAuthentication;
use at_02_sender_envelope::VerifiedSender;
use at_03_delegation::VerifiedUser;
use std::fmt;
use uuid::Uuid;

/// Identity of one inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an id assigned by the transport.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse the hyphenated form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Per-request verification state.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub request_id: RequestId,
    /// Layer 1 result, if the message carried a sender envelope.
    pub sender: Option<VerifiedSender>,
    /// Layer 2 result, if the message carried a delegation envelope.
    pub user: Option<VerifiedUser>,
}

impl RequestContext {
    /// Context with nothing verified yet.
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            sender: None,
            user: None,
        }
    }

    /// Context carrying the results of an inbound authentication.
    pub fn from_authentication(request_id: RequestId, auth: InboundAuthentication) -> Self {
        Self {
            request_id,
            sender: auth.sender,
            user: auth.user,
        }
    }

    #[must_use]
    pub fn with_sender(mut self, sender: VerifiedSender) -> Self {
        self.sender = Some(sender);
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: VerifiedUser) -> Self {
        self.user = Some(user);
        self
    }

    /// The sender, only if its envelope verified.
    pub fn authentic_sender(&self) -> Option<&VerifiedSender> {
        self.sender.as_ref().filter(|s| s.is_authentic())
    }

    /// The delegating user, only if the delegation is valid.
    pub fn authorized_user(&self) -> Option<&VerifiedUser> {
        self.user.as_ref().filter(|u| u.valid)
    }
}
