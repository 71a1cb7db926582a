//! # Sender Envelope (AT-02)
//!
//! Layer 1 message authentication: binds an agent's DID to one message's id
//! and content.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): canonical encoding, digests, envelope
//!   wire format and the freshness rule
//! - **Ports Layer** (`ports/`): `SenderEnvelopeApi` (driving) and
//!   `DidResolver` (driven)
//! - **Service Layer** (`service.rs`): signing and verification
//! - **Adapters** (`adapters/`): static and caching resolvers
//!
//! ## Wire Format
//!
//! The envelope travels in message metadata under
//! [`SENDER_ENVELOPE_KEY`]:
//!
//! ```json
//! {
//!   "senderDid": "did:web:agents.example.com:alice",
//!   "signature": "<128 lowercase hex chars>",
//!   "timestamp": "2024-05-01T12:00:00.000Z",
//!   "messageId": "msg-42"
//! }
//! ```
//!
//! The signature is Ed25519 over the canonical JSON
//! `{"contentDigest":"<hex>","messageId":"<id>"}`.
//!
//! ## Security Notes
//!
//! - Verification never raises. Every failure lands in [`VerifiedSender`].
//! - Stale and future-dated envelopes are rejected before any resolver call.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::caching::CachingDidResolver;
pub use adapters::static_resolver::StaticDidResolver;
pub use domain::canonical::canonicalize;
pub use domain::digest::{compute_digest, ContentDigest};
pub use domain::entities::{SenderFailure, SenderIdentity, VerifiedSender};
pub use domain::envelope::{
    decode, extract, extract_checked, signing_payload, SenderEnvelope, SENDER_ENVELOPE_KEY,
};
pub use domain::errors::{EnvelopeError, ResolveError};
pub use domain::freshness::MAX_FUTURE_SKEW;
pub use ports::inbound::SenderEnvelopeApi;
pub use ports::outbound::DidResolver;
pub use service::SenderEnvelopeService;
