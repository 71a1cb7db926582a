//! # Adapters

pub mod replay;
