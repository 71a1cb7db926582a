//! # Shared Types Crate
//!
//! Identity, message and clock types used by every Agent-Trust component.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-component types are defined here.
//! - **Opaque transport**: Messages are an ordered list of typed parts plus a
//!   string-keyed JSON metadata map. Envelopes live inside that map.
//! - **Injected time**: Every time-sensitive check reads a [`TimeSource`],
//!   never the wall clock directly.

pub mod did;
pub mod errors;
pub mod message;
pub mod time;

pub use did::{Did, DidDocument, ServiceEndpoint, VerificationMethod};
pub use errors::DidError;
pub use message::{FileContent, Message, MessageMetadata, MessagePart};
pub use time::{SystemTimeSource, TimeSource};

#[cfg(any(test, feature = "test-utils"))]
pub use time::FixedTimeSource;
