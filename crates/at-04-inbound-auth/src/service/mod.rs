//! # Service Layer
//!
//! - `authenticator`: inbound Layer 1 + Layer 2 checks
//! - `connection`: gated outbound connections and their snapshots
//! - `signer`: outbound envelope signing

pub mod authenticator;
pub mod connection;
pub mod signer;
