//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::ResolveError;
use async_trait::async_trait;
use shared_crypto::Ed25519PublicKey;
use shared_types::Did;
use std::sync::Arc;

/// DID-resolution capability.
///
/// Injected into the verifier. Never a process-wide singleton.
#[async_trait]
pub trait DidResolver: Send + Sync {
    /// The Ed25519 public key currently published for `did`.
    async fn resolve(&self, did: &Did) -> Result<Ed25519PublicKey, ResolveError>;
}

#[async_trait]
impl<D: DidResolver + ?Sized> DidResolver for Arc<D> {
    async fn resolve(&self, did: &Did) -> Result<Ed25519PublicKey, ResolveError> {
        (**self).resolve(did).await
    }
}
