//! # Adapters
//!
//! - `config`: `TrustGatePolicy` from TOML or from code
//! - `memory`: in-process `AgentRegistry` with call counters

pub mod config;
pub mod memory;
