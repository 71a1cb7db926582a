//! # Ed25519 Agent Identity Keys
//!
//! An agent proves it sent a message by signing the envelope payload with
//! the secret half of the Ed25519 key listed in its DID document. Verifiers
//! take the public half from the document, usually as `publicKeyHex`.
//!
//! Verification is strict (`verify_strict`): small-order keys and
//! non-canonical signature encodings are refused, so one signed envelope
//! has exactly one acceptable byte form.

use crate::errors::decode_hex_array;
use crate::CryptoError;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use std::fmt;
use zeroize::Zeroize;

/// Public half of an agent identity key, as published in a DID document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey([u8; 32]);

impl Ed25519PublicKey {
    /// Accepts only encodings that decompress to a curve point.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Parse a document's `publicKeyHex` (`0x` prefix optional).
    pub fn from_hex(input: &str) -> Result<Self, CryptoError> {
        decode_hex_array::<32>(input).and_then(Self::from_bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Check that `signature` over `payload` was made by this key.
    pub fn verify(&self, payload: &[u8], signature: &Ed25519Signature) -> Result<(), CryptoError> {
        let key = VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;
        key.verify_strict(payload, &Signature::from_bytes(&signature.0))
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

/// Detached 64-byte signature, carried hex-encoded in sender envelopes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519Signature([u8; 64]);

impl Ed25519Signature {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Parse the envelope's `signature` field (`0x` prefix optional).
    pub fn from_hex(input: &str) -> Result<Self, CryptoError> {
        decode_hex_array::<64>(input).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Lowercase hex, the form written into envelopes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// An agent's signing identity. The secret is wiped on drop and never
/// printed.
pub struct Ed25519KeyPair {
    secret: SigningKey,
}

impl Ed25519KeyPair {
    /// Fresh identity from the thread RNG.
    pub fn generate() -> Self {
        Self {
            secret: SigningKey::generate(&mut rand::thread_rng()),
        }
    }

    /// Identity from a stored 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            secret: SigningKey::from_bytes(&seed),
        }
    }

    /// The key to publish in the agent's DID document.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.secret.verifying_key().to_bytes())
    }

    /// Deterministic: the same payload always yields the same signature.
    pub fn sign(&self, payload: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.secret.sign(payload).to_bytes())
    }
}

impl fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public_key", &self.public_key().to_hex())
            .finish_non_exhaustive()
    }
}

impl Drop for Ed25519KeyPair {
    fn drop(&mut self) {
        let mut seed = self.secret.to_bytes();
        seed.zeroize();
    }
}
