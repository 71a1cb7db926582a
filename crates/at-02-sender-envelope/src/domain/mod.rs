//! # Domain Layer
//!
//! Pure envelope logic with no I/O dependencies.

pub mod canonical;
pub mod digest;
pub mod entities;
pub mod envelope;
pub mod errors;
pub mod freshness;
