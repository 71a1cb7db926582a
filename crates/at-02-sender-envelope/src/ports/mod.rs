//! # Ports Layer
//!
//! - **Inbound (Driving)**: signing and verification API
//! - **Outbound (Driven)**: DID to public key resolution

pub mod inbound;
pub mod outbound;
