//! # Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities the gate consumes: the agent registry and a policy source.

use crate::domain::entities::{AgentRecord, TrustGatePolicy};
use crate::domain::errors::RegistryError;
use async_trait::async_trait;
use shared_types::{Did, DidDocument};
use std::sync::Arc;

/// Agent registry capability.
///
/// Implementations must be thread-safe (`Send + Sync`). The gate never
/// retries a failed call.
#[async_trait]
pub trait AgentRegistry: Send + Sync {
    /// Resolve a DID to its document.
    async fn resolve_did(&self, did: &Did) -> Result<DidDocument, RegistryError>;

    /// Probe whether the agent currently responds.
    async fn check_liveness(&self, did: &Did) -> Result<bool, RegistryError>;

    /// Fetch the current registry record for an agent.
    async fn get_agent(&self, did: &Did) -> Result<AgentRecord, RegistryError>;
}

#[async_trait]
impl<R: AgentRegistry + ?Sized> AgentRegistry for Arc<R> {
    async fn resolve_did(&self, did: &Did) -> Result<DidDocument, RegistryError> {
        (**self).resolve_did(did).await
    }

    async fn check_liveness(&self, did: &Did) -> Result<bool, RegistryError> {
        (**self).check_liveness(did).await
    }

    async fn get_agent(&self, did: &Did) -> Result<AgentRecord, RegistryError> {
        (**self).get_agent(did).await
    }
}

/// Source of the gating policy for a client or session.
pub trait PolicyProvider: Send + Sync {
    /// The policy to apply.
    fn policy(&self) -> TrustGatePolicy;
}
