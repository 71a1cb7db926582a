//! # Delegation Errors
//!
//! Errors for building and reading delegation envelopes. Verification itself
//! never fails; see `VerifiedUser`.

use shared_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DelegationError {
    /// The envelope in metadata is missing fields or has wrong types
    #[error("malformed delegation envelope: {0}")]
    Malformed(String),

    /// The envelope could not be serialized
    #[error("delegation encoding failed: {0}")]
    Encoding(String),

    /// `userAddress` is not a 20-byte hex address
    #[error("invalid user address: {0}")]
    InvalidAddress(String),

    /// The signing key refused to sign
    #[error("signing failed")]
    Signing(#[source] CryptoError),

    /// The signing key does not control `userAddress`
    #[error("signing key controls {actual}, delegation names {claimed}")]
    WrongSigner { claimed: String, actual: String },
}
