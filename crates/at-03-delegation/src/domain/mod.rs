//! # Domain Layer
//!
//! Pure typed-data logic with no I/O dependencies.

pub mod eip712;
pub mod entities;
pub mod envelope;
pub mod errors;
pub mod verification;
