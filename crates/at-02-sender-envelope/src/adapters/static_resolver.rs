//! Fixed DID to key table.

use crate::domain::errors::ResolveError;
use crate::ports::outbound::DidResolver;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_crypto::Ed25519PublicKey;
use shared_types::Did;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// `DidResolver` over an in-memory table.
#[derive(Debug, Default)]
pub struct StaticDidResolver {
    keys: RwLock<HashMap<Did, Ed25519PublicKey>>,
    failures: RwLock<HashMap<Did, ResolveError>>,
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticDidResolver {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every resolution by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Publish `key` for `did`.
    pub fn insert(&self, did: Did, key: Ed25519PublicKey) {
        self.keys.write().insert(did, key);
    }

    /// Remove the key for `did`.
    pub fn remove(&self, did: &Did) {
        self.keys.write().remove(did);
    }

    /// Make resolution of `did` fail with `error`.
    pub fn fail(&self, did: &Did, error: ResolveError) {
        self.failures.write().insert(did.clone(), error);
    }

    /// Number of `resolve` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DidResolver for StaticDidResolver {
    async fn resolve(&self, did: &Did) -> Result<Ed25519PublicKey, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(error) = self.failures.read().get(did) {
            return Err(error.clone());
        }
        self.keys
            .read()
            .get(did)
            .copied()
            .ok_or_else(|| ResolveError::NotFound(did.clone()))
    }
}
