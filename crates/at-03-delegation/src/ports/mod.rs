//! # Ports Layer
//!
//! Delegation needs no driven capability beyond the shared clock, so only
//! the inbound API lives here.

pub mod inbound;
