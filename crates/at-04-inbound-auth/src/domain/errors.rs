//! # Composition Errors

use crate::domain::context::RequestId;
use at_01_trust_gate::{RegistryError, TrustGateError};
use at_02_sender_envelope::EnvelopeError;
use at_03_delegation::DelegationError;
use thiserror::Error;

/// A request scope could not be opened.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScopeError {
    /// Another live scope already holds this request id
    #[error("request {0} already has an open verification scope")]
    Duplicate(RequestId),
}

/// Re-verifying a trusted connection failed. The previous snapshot stays.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConnectionError {
    /// The registry could not return a fresh agent record
    #[error("could not refresh agent record")]
    Refresh(#[source] RegistryError),

    /// The fresh record no longer passes the gate
    #[error(transparent)]
    Gate(#[from] TrustGateError),
}

/// Envelopes could not be written into outgoing metadata.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OutboundError {
    #[error(transparent)]
    Sender(#[from] EnvelopeError),

    #[error(transparent)]
    Delegation(#[from] DelegationError),
}
