//! # Ports Layer
//!
//! Driven capabilities come from the component crates (`AgentRegistry`,
//! `DidResolver`); only the composed inbound API is declared here.

pub mod inbound;
