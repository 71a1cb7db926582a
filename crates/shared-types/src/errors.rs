//! # Error Types
//!
//! Defines error types used across components.

use thiserror::Error;

/// A string could not be parsed as a DID.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DidError {
    /// Missing the `did:` scheme prefix.
    #[error("not a DID (missing \"did:\" prefix): {0}")]
    MissingScheme(String),

    /// Method name is empty or contains characters outside `[a-z0-9]`.
    #[error("invalid DID method in {0}")]
    InvalidMethod(String),

    /// Method-specific identifier is empty.
    #[error("empty method-specific identifier in {0}")]
    EmptyIdentifier(String),
}
