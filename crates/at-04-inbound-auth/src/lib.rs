//! # Inbound Authentication (AT-04)
//!
//! Puts the three trust facets together for an agent runtime:
//!
//! - **Outbound**: [`TrustedConnection`] gates a remote agent before the first
//!   request and tracks whether its responses were authentically signed.
//!   [`OutboundSigner`] attaches sender (and optionally delegation)
//!   envelopes to outgoing messages.
//! - **Inbound**: [`InboundAuthenticator`] verifies both envelopes on a
//!   received message. Results belong to that request only, either on a
//!   [`RequestContext`] or in [`VerificationScopes`] behind an RAII
//!   [`ScopeGuard`].
//!
//! [`RegistryDidResolver`] lets the sender layer resolve keys through the
//! same registry the trust gate uses.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::registry_resolver::RegistryDidResolver;
pub use adapters::scopes::{ScopeGuard, VerificationScopes};
pub use domain::authentication::{InboundAuthentication, MalformedEnvelope};
pub use domain::context::{RequestContext, RequestId};
pub use domain::errors::{ConnectionError, OutboundError, ScopeError};
pub use ports::inbound::InboundAuthApi;
pub use service::authenticator::InboundAuthenticator;
pub use service::connection::TrustedConnection;
pub use service::signer::OutboundSigner;
