//! # EIP-712 Encoding
//!
//! Only the two types this crate signs are supported, so the encoder is
//! written out per type instead of driven by a type registry.
//!
//! | Solidity type | `encodeData` word |
//! |---------------|-------------------|
//! | `string`      | `keccak256(utf8 bytes)` |
//! | `address`     | 20 bytes left-padded with zeros |
//! | `uint256`     | 32-byte big-endian |

use crate::domain::entities::Delegation;
use crate::domain::errors::DelegationError;
use primitive_types::U256;
use shared_crypto::hashing::keccak256_many;
use shared_crypto::{keccak256, Address, Hash};

/// Domain `name` for delegations.
pub const DOMAIN_NAME: &str = "AgentTrustDelegation";

/// Domain `version` for delegations.
pub const DOMAIN_VERSION: &str = "1";

/// Primary type signature.
pub const DELEGATION_TYPE: &str =
    "Delegation(address userAddress,string delegateDid,string scope,uint256 exp,string nonce)";

/// EIP-712 domain. `chain_id` and `verifying_contract` are optional and
/// omitted from the type when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: Option<U256>,
    pub verifying_contract: Option<Address>,
}

impl Eip712Domain {
    /// Domain with only `name` and `version`.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: None,
            verifying_contract: None,
        }
    }

    /// The fixed delegation domain.
    pub fn delegation() -> Self {
        Self::new(DOMAIN_NAME, DOMAIN_VERSION)
    }

    /// Bind to a chain.
    #[must_use]
    pub fn with_chain_id(mut self, chain_id: U256) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Bind to a verifying contract.
    #[must_use]
    pub fn with_verifying_contract(mut self, contract: Address) -> Self {
        self.verifying_contract = Some(contract);
        self
    }

    /// `EIP712Domain(...)` listing only the fields that are set.
    pub fn type_string(&self) -> String {
        let mut fields = vec!["string name", "string version"];
        if self.chain_id.is_some() {
            fields.push("uint256 chainId");
        }
        if self.verifying_contract.is_some() {
            fields.push("address verifyingContract");
        }
        format!("EIP712Domain({})", fields.join(","))
    }

    /// `hashStruct(domain)`.
    pub fn separator(&self) -> Hash {
        let type_hash = keccak256(self.type_string().as_bytes());
        let name = keccak256(self.name.as_bytes());
        let version = keccak256(self.version.as_bytes());

        let mut words: Vec<Hash> = vec![type_hash, name, version];
        if let Some(chain_id) = self.chain_id {
            words.push(encode_uint(chain_id));
        }
        if let Some(contract) = &self.verifying_contract {
            words.push(encode_address(contract));
        }

        keccak256(&words.concat())
    }
}

impl Default for Eip712Domain {
    fn default() -> Self {
        Self::delegation()
    }
}

/// `keccak256(DELEGATION_TYPE)`.
pub fn delegation_type_hash() -> Hash {
    keccak256(DELEGATION_TYPE.as_bytes())
}

/// `hashStruct(delegation)`.
///
/// Fails only if `user_address` is not a 20-byte hex address.
pub fn hash_delegation(delegation: &Delegation) -> Result<Hash, DelegationError> {
    let user = Address::from_hex(&delegation.user_address)
        .map_err(|_| DelegationError::InvalidAddress(delegation.user_address.clone()))?;

    let words: [Hash; 6] = [
        delegation_type_hash(),
        encode_address(&user),
        keccak256(delegation.delegate_did.as_bytes()),
        keccak256(delegation.scope.as_bytes()),
        encode_uint(delegation.exp),
        keccak256(delegation.nonce.as_bytes()),
    ];
    Ok(keccak256(&words.concat()))
}

/// `keccak256(0x19 0x01 || domain_separator || struct_hash)`.
pub fn typed_data_digest(domain_separator: &Hash, struct_hash: &Hash) -> Hash {
    keccak256_many(&[
        [0x19u8, 0x01].as_slice(),
        domain_separator.as_slice(),
        struct_hash.as_slice(),
    ])
}

fn encode_address(address: &Address) -> Hash {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

fn encode_uint(value: U256) -> Hash {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}
