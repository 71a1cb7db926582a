//! # Attack Simulations
//!
//! Each test plays an attacker with full control of message metadata and
//! asserts the verifiers refuse to vouch for the forged claim.

pub mod delegation;
pub mod envelope;
