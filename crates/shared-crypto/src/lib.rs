//! # Shared Crypto - Agent-Trust Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, Keccak-256 | Content digests, typed-data hashing |
//! | `signatures` | Ed25519 | Agent sender envelopes |
//! | `ecdsa` | secp256k1 (recoverable) | Wallet-signed user delegations |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)
//! - Secret key material is zeroized on drop

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use ecdsa::{recover_address, Address, RecoverableSignature, Secp256k1KeyPair};
pub use errors::CryptoError;
pub use hashing::{keccak256, sha256, sha256_hex, Hash};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
