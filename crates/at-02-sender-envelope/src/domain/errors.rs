//! # Envelope Errors

use shared_types::Did;
use thiserror::Error;

/// An envelope in metadata could not be read or written.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// A required field is missing or has the wrong type
    #[error("malformed envelope: {0}")]
    Malformed(String),

    /// The envelope could not be serialized
    #[error("envelope encoding failed: {0}")]
    Encoding(String),
}

/// A `DidResolver` could not produce a key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No such DID
    #[error("DID not found: {0}")]
    NotFound(Did),

    /// The DID document has no usable Ed25519 verification method
    #[error("no Ed25519 key for {0}")]
    NoEd25519Key(Did),

    /// The key material is not a valid Ed25519 public key
    #[error("invalid public key: {0}")]
    InvalidKey(String),

    /// The resolution backend failed
    #[error("resolver backend failed: {0}")]
    Backend(String),
}
