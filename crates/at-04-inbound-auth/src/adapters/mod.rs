//! # Adapters

pub mod registry_resolver;
pub mod scopes;
