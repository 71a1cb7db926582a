//! # Adapters
//!
//! `DidResolver` implementations.

pub mod caching;
pub mod static_resolver;
