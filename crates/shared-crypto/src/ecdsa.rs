//! # ECDSA Signatures (secp256k1, recoverable)
//!
//! Wallet-compatible signatures: 65 bytes `r || s || v`, where the signer's
//! address is recovered from the signature instead of being transmitted.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization (EIP-2) on both signing and recovery
//! - Constant-time address comparison
//!
//! ## Use Cases
//!
//! - User delegations signed by an external wallet (EIP-712)
//! - Server-assisted signing in tests and tooling

use crate::errors::decode_hex_array;
use crate::hashing::{keccak256, Hash};
use crate::CryptoError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Ethereum-style address: last 20 bytes of `keccak256(uncompressed_pubkey[1..])`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Wrap raw bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Parse `0x`-prefixed (or bare) hex, any letter case.
    pub fn from_hex(input: &str) -> Result<Self, CryptoError> {
        decode_hex_array::<20>(input).map(Self)
    }

    /// Derive the address of a secp256k1 public key.
    pub fn from_verifying_key(public_key: &VerifyingKey) -> Self {
        let encoded = public_key.to_encoded_point(false);
        // Keccak256 hash of public key (without 0x04 prefix)
        let hash = keccak256(&encoded.as_bytes()[1..]);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        Self(address)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Constant-time equality.
    pub fn ct_matches(&self, other: &Address) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl std::fmt::Display for Address {
    /// Renders `0x` followed by lowercase hex.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Recoverable ECDSA signature on secp256k1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl RecoverableSignature {
    /// Parse the 65-byte wallet encoding `r || s || v`.
    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self { r, s, v: bytes[64] }
    }

    /// Parse `0x`-prefixed hex of the 65-byte encoding.
    pub fn from_hex(input: &str) -> Result<Self, CryptoError> {
        let bytes = decode_hex_array::<65>(input)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// The 65-byte encoding.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// `0x`-prefixed lowercase hex, the form wallets return.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Address controlled by this key.
    pub fn address(&self) -> Address {
        Address::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte prehash, producing a low-S recoverable signature with
    /// `v` in the 27/28 convention.
    pub fn sign_prehash(&self, prehash: &Hash) -> Result<RecoverableSignature, CryptoError> {
        let (sig, recid) = self
            .signing_key
            .sign_prehash_recoverable(prehash)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        // Normalize S to low value (EIP-2)
        let (sig, recid) = match sig.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced()),
            ),
            None => (sig, recid),
        };

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        Ok(RecoverableSignature {
            r,
            s,
            v: recid.to_byte() + 27,
        })
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("address", &self.address().to_string())
            .finish_non_exhaustive()
    }
}

impl Drop for Secp256k1KeyPair {
    fn drop(&mut self) {
        // Zeroize secret key material
        let mut bytes: [u8; 32] = self.signing_key.to_bytes().into();
        bytes.zeroize();
    }
}

/// Recover the signer's address from a signature over a 32-byte prehash.
///
/// High-S signatures are normalized (with the recovery bit flipped) before
/// recovery, so both encodings of the same signature recover the same signer.
pub fn recover_address(
    prehash: &Hash,
    signature: &RecoverableSignature,
) -> Result<Address, CryptoError> {
    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = parsed.map_err(|_| CryptoError::InvalidSignatureFormat)?;

    let (sig, recovery_id) = match sig.normalize_s() {
        Some(normalized) => (
            normalized,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (sig, recovery_id),
    };

    let recovered_key = VerifyingKey::recover_from_prehash(prehash, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;

    Ok(Address::from_verifying_key(&recovered_key))
}

/// Parse recovery ID from v value.
///
/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, CryptoError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(CryptoError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| CryptoError::InvalidRecoveryId(v))
}
