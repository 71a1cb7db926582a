//! # Domain Layer
//!
//! Pure gating logic with no I/O dependencies.

pub mod entities;
pub mod errors;
pub mod stages;
