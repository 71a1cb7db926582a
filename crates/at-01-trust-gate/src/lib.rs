//! # Trust Gate (AT-01)
//!
//! Connection-time gating: before talking to a remote agent, decide whether
//! its identity resolves, whether it is live, and whether its reputation
//! clears the configured bar.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Entities, errors and the pure stage checks
//! - **Ports Layer** (`ports/`): `TrustGateApi` (driving) and `AgentRegistry` (driven)
//! - **Service Layer** (`service.rs`): Runs the pipeline against a registry
//! - **Adapters** (`adapters/`): Policy loading and an in-memory registry
//!
//! ## Pipeline
//!
//! ```text
//! identity ──▶ liveness ──▶ reputation ──▶ TrustSnapshot
//!    │            │             │
//!    ▼            ▼             ▼
//! DidResolutionFailed  AgentNotLive  TrustScoreBelowThreshold
//! ```
//!
//! Stages run strictly in order and the first failure is returned. There are
//! no retries; running the gate again re-reads the registry.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::config::{ConfigError, StaticPolicyProvider, TomlPolicyProvider};
pub use adapters::memory::InMemoryAgentRegistry;
pub use domain::entities::{AgentRecord, TrustGatePolicy, TrustSnapshot};
pub use domain::errors::{RegistryError, TrustGateError};
pub use domain::stages::GateStage;
pub use ports::inbound::TrustGateApi;
pub use ports::outbound::{AgentRegistry, PolicyProvider};
pub use service::TrustGateService;
