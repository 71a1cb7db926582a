//! `DidResolver` backed by an `AgentRegistry`.

use at_01_trust_gate::{AgentRegistry, RegistryError};
use at_02_sender_envelope::{DidResolver, ResolveError};
use async_trait::async_trait;
use shared_crypto::Ed25519PublicKey;
use shared_types::Did;
use tracing::debug;

/// Resolves a sender's key from the first Ed25519 verification method of
/// its registry DID document.
pub struct RegistryDidResolver<R: AgentRegistry> {
    registry: R,
}

impl<R: AgentRegistry> RegistryDidResolver<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }
}

#[async_trait]
impl<R: AgentRegistry> DidResolver for RegistryDidResolver<R> {
    async fn resolve(&self, did: &Did) -> Result<Ed25519PublicKey, ResolveError> {
        debug!(did = %did, "Resolving sender key from registry");

        let document = self.registry.resolve_did(did).await.map_err(|e| match e {
            RegistryError::NotFound(did) => ResolveError::NotFound(did),
            other => ResolveError::Backend(other.to_string()),
        })?;

        if &document.id != did {
            return Err(ResolveError::Backend(format!(
                "registry returned document for {}",
                document.id
            )));
        }

        let key_hex = document
            .ed25519_public_key_hex()
            .ok_or_else(|| ResolveError::NoEd25519Key(did.clone()))?;

        Ed25519PublicKey::from_hex(key_hex).map_err(|e| ResolveError::InvalidKey(e.to_string()))
    }
}
