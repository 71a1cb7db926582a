//! In-process agent registry.
//!
//! Backs tests and single-process deployments. Every call is counted so
//! callers can assert which stages touched the registry.

use crate::domain::entities::AgentRecord;
use crate::domain::errors::RegistryError;
use crate::ports::outbound::AgentRegistry;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Did, DidDocument};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// `AgentRegistry` held in memory.
#[derive(Debug, Default)]
pub struct InMemoryAgentRegistry {
    agents: RwLock<HashMap<Did, AgentRecord>>,
    documents: RwLock<HashMap<Did, DidDocument>>,
    liveness: RwLock<HashMap<Did, bool>>,
    resolution_failures: RwLock<HashMap<Did, RegistryError>>,
    liveness_failures: RwLock<HashMap<Did, RegistryError>>,
    latency: Option<Duration>,
    resolve_calls: AtomicUsize,
    liveness_calls: AtomicUsize,
    get_agent_calls: AtomicUsize,
}

impl InMemoryAgentRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add or replace an agent record.
    pub fn insert_agent(&self, record: AgentRecord) {
        self.agents.write().insert(record.did.clone(), record);
    }

    /// Add or replace a DID document.
    pub fn insert_document(&self, document: DidDocument) {
        self.documents.write().insert(document.id.clone(), document);
    }

    /// Fix the answer a liveness probe gives for `did`.
    pub fn set_liveness(&self, did: &Did, live: bool) {
        self.liveness.write().insert(did.clone(), live);
    }

    /// Make `resolve_did` fail for `did`.
    pub fn fail_resolution(&self, did: &Did, error: RegistryError) {
        self.resolution_failures.write().insert(did.clone(), error);
    }

    /// Make `check_liveness` fail for `did`.
    pub fn fail_liveness(&self, did: &Did, error: RegistryError) {
        self.liveness_failures.write().insert(did.clone(), error);
    }

    /// Number of `resolve_did` calls so far.
    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Number of `check_liveness` calls so far.
    pub fn liveness_calls(&self) -> usize {
        self.liveness_calls.load(Ordering::SeqCst)
    }

    /// Number of `get_agent` calls so far.
    pub fn get_agent_calls(&self) -> usize {
        self.get_agent_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl AgentRegistry for InMemoryAgentRegistry {
    async fn resolve_did(&self, did: &Did) -> Result<DidDocument, RegistryError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if let Some(error) = self.resolution_failures.read().get(did) {
            return Err(error.clone());
        }
        self.documents
            .read()
            .get(did)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(did.clone()))
    }

    async fn check_liveness(&self, did: &Did) -> Result<bool, RegistryError> {
        self.liveness_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if let Some(error) = self.liveness_failures.read().get(did) {
            return Err(error.clone());
        }
        if let Some(live) = self.liveness.read().get(did) {
            return Ok(*live);
        }
        self.agents
            .read()
            .get(did)
            .map(|agent| agent.is_live)
            .ok_or_else(|| RegistryError::NotFound(did.clone()))
    }

    async fn get_agent(&self, did: &Did) -> Result<AgentRecord, RegistryError> {
        self.get_agent_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        self.agents
            .read()
            .get(did)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(did.clone()))
    }
}
