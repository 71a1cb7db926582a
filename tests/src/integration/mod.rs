//! # Integration Tests
//!
//! Cross-crate flows exercised through the public APIs only.

pub mod concurrency;
pub mod flows;
