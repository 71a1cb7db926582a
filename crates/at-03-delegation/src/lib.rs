//! # Delegation Envelope (AT-03)
//!
//! Proves that a human wallet holder authorized a specific agent, for a
//! specific scope, until a specific time.
//!
//! ## Typed Data
//!
//! ```text
//! EIP712Domain(string name,string version)
//!   name    = "AgentTrustDelegation"
//!   version = "1"
//!
//! Delegation(address userAddress,string delegateDid,string scope,uint256 exp,string nonce)
//! ```
//!
//! The signed digest is `keccak256(0x19 0x01 || domainSeparator || hashStruct(delegation))`,
//! byte-for-byte what `eth_signTypedData_v4` produces.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): EIP-712 encoding, wire types, validity rule
//! - **Ports Layer** (`ports/`): `DelegationApi`
//! - **Service Layer** (`service.rs`): clock-aware sign/verify
//! - **Adapters** (`adapters/`): optional nonce replay guard
//!
//! ## Security Notes
//!
//! - `verify` does not track nonces. Callers that need single use wire in a
//!   [`NonceReplayGuard`].
//! - High-S signatures are normalized before recovery.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::replay::NonceReplayGuard;
pub use domain::eip712::{
    delegation_type_hash, hash_delegation, typed_data_digest, Eip712Domain, DELEGATION_TYPE,
    DOMAIN_NAME, DOMAIN_VERSION,
};
pub use domain::entities::{Delegation, DelegationEnvelope, DelegationFailure, VerifiedUser};
pub use domain::envelope::{decode, extract, extract_checked, signing_digest, DELEGATION_KEY};
pub use domain::errors::DelegationError;
pub use domain::verification::evaluate;
pub use ports::inbound::DelegationApi;
pub use service::DelegationService;
