//! # Domain Layer

pub mod authentication;
pub mod context;
pub mod errors;
