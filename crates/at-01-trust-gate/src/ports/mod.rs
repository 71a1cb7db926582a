//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that external callers use
//! - **Outbound (Driven)**: Registry and policy sources the gate needs

pub mod inbound;
pub mod outbound;
