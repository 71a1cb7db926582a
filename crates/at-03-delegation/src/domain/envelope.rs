//! Delegation envelope wire format and signing.

use crate::domain::eip712::{hash_delegation, typed_data_digest, Eip712Domain};
use crate::domain::entities::{Delegation, DelegationEnvelope};
use crate::domain::errors::DelegationError;
use serde::Deserialize;
use serde_json::Value;
use shared_crypto::{Address, Hash, Secp256k1KeyPair};
use shared_types::MessageMetadata;

/// Metadata key carrying the delegation envelope.
pub const DELEGATION_KEY: &str = "agentTrust.delegation";

/// The 32-byte prehash a wallet signs for `delegation` under `domain`.
pub fn signing_digest(
    delegation: &Delegation,
    domain: &Eip712Domain,
) -> Result<Hash, DelegationError> {
    let struct_hash = hash_delegation(delegation)?;
    Ok(typed_data_digest(&domain.separator(), &struct_hash))
}

impl DelegationEnvelope {
    /// Sign `delegation` with the user's key.
    ///
    /// The key must control `delegation.user_address`.
    pub fn sign(
        delegation: Delegation,
        key: &Secp256k1KeyPair,
        domain: &Eip712Domain,
    ) -> Result<Self, DelegationError> {
        let claimed = Address::from_hex(&delegation.user_address)
            .map_err(|_| DelegationError::InvalidAddress(delegation.user_address.clone()))?;
        let actual = key.address();
        if !claimed.ct_matches(&actual) {
            return Err(DelegationError::WrongSigner {
                claimed: delegation.user_address.clone(),
                actual: actual.to_string(),
            });
        }

        let digest = signing_digest(&delegation, domain)?;
        let signature = key.sign_prehash(&digest).map_err(DelegationError::Signing)?;

        Ok(Self {
            delegation,
            signature: signature.to_hex(),
        })
    }

    /// Place this envelope under [`DELEGATION_KEY`].
    pub fn attach(&self, metadata: &mut MessageMetadata) -> Result<(), DelegationError> {
        let value =
            serde_json::to_value(self).map_err(|e| DelegationError::Encoding(e.to_string()))?;
        metadata.insert(DELEGATION_KEY.to_owned(), value);
        Ok(())
    }
}

/// Strict decode of an envelope value.
pub fn decode(value: &Value) -> Result<DelegationEnvelope, DelegationError> {
    DelegationEnvelope::deserialize(value).map_err(|e| DelegationError::Malformed(e.to_string()))
}

/// The envelope in `metadata`, if present and well-formed.
pub fn extract(metadata: &MessageMetadata) -> Option<DelegationEnvelope> {
    extract_checked(metadata).ok().flatten()
}

/// Like [`extract`] but reports malformed envelopes.
pub fn extract_checked(
    metadata: &MessageMetadata,
) -> Result<Option<DelegationEnvelope>, DelegationError> {
    metadata.get(DELEGATION_KEY).map(decode).transpose()
}
