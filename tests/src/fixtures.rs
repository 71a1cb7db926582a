//! Shared test world: one registry, agents published in it, and services
//! wired the way a runtime would wire them.

use at_01_trust_gate::{AgentRecord, InMemoryAgentRegistry, TrustGateService};
use at_02_sender_envelope::{SenderEnvelopeService, SenderIdentity};
use at_03_delegation::{Delegation, DelegationService, Eip712Domain};
use at_04_inbound_auth::{InboundAuthenticator, OutboundSigner, RegistryDidResolver};
use shared_crypto::{Ed25519KeyPair, Secp256k1KeyPair};
use shared_types::{Did, DidDocument, FixedTimeSource, VerificationMethod};
use std::sync::Arc;
use std::time::Duration;

/// Fixed "now" for every scenario (2023-11-14T22:13:20Z).
pub const NOW: i64 = 1_700_000_000;

pub const MAX_MESSAGE_AGE: Duration = Duration::from_secs(300);

pub type Registry = Arc<InMemoryAgentRegistry>;
pub type Gate = TrustGateService<Registry, FixedTimeSource>;
pub type Senders = SenderEnvelopeService<RegistryDidResolver<Registry>, FixedTimeSource>;
pub type Delegations = DelegationService<FixedTimeSource>;
pub type Authenticator = InboundAuthenticator<Senders, Delegations>;

pub fn did(name: &str) -> Did {
    Did::parse(format!("did:web:agents.example.com:{name}")).expect("valid test DID")
}

/// An agent with a signing key and a registry entry.
pub struct TestAgent {
    pub did: Did,
    pub seed: [u8; 32],
    pub record: AgentRecord,
}

impl TestAgent {
    pub fn new(name: &str, seed: u8, trust_score: f64) -> Self {
        let did = did(name);
        let record = AgentRecord::new(did.clone(), format!("https://agents.example.com/{name}"))
            .with_trust_score(trust_score)
            .with_live(true);
        Self {
            did,
            seed: [seed; 32],
            record,
        }
    }

    pub fn identity(&self) -> SenderIdentity {
        SenderIdentity::new(self.did.clone(), Ed25519KeyPair::from_seed(self.seed))
    }

    pub fn document(&self) -> DidDocument {
        let key = Ed25519KeyPair::from_seed(self.seed).public_key();
        DidDocument {
            id: self.did.clone(),
            verification_method: vec![VerificationMethod {
                id: format!("{}#key-1", self.did),
                method_type: "Ed25519VerificationKey2020".into(),
                controller: self.did.to_string(),
                public_key_hex: Some(key.to_hex()),
            }],
            service: vec![],
        }
    }
}

/// Registry plus services at a fixed clock.
pub struct World {
    pub registry: Registry,
    pub now: i64,
}

impl World {
    pub fn new() -> Self {
        Self::at(NOW)
    }

    pub fn at(now: i64) -> Self {
        Self {
            registry: Arc::new(InMemoryAgentRegistry::new()),
            now,
        }
    }

    /// Publish `agent`'s record and DID document.
    pub fn publish(&self, agent: &TestAgent) {
        self.registry.insert_agent(agent.record.clone());
        self.registry.insert_document(agent.document());
    }

    pub fn clock(&self) -> FixedTimeSource {
        FixedTimeSource::at_unix(self.now)
    }

    pub fn gate(&self) -> Arc<Gate> {
        Arc::new(TrustGateService::with_time_source(
            self.registry.clone(),
            self.clock(),
        ))
    }

    pub fn senders(&self) -> Senders {
        SenderEnvelopeService::with_time_source(
            RegistryDidResolver::new(self.registry.clone()),
            self.clock(),
        )
    }

    pub fn delegations(&self) -> Delegations {
        DelegationService::with_time_source(Eip712Domain::delegation(), self.clock())
    }

    pub fn authenticator(&self) -> Authenticator {
        InboundAuthenticator::new(self.senders(), self.delegations(), MAX_MESSAGE_AGE)
    }

    pub fn signer(&self, agent: &TestAgent) -> OutboundSigner<Senders> {
        OutboundSigner::new(self.senders(), agent.identity())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// A wallet key. Seeds must be non-zero.
pub fn wallet(seed: u8) -> Secp256k1KeyPair {
    Secp256k1KeyPair::from_bytes([seed; 32]).expect("valid secp256k1 secret")
}

pub fn delegation(user: &Secp256k1KeyPair, delegate: &Did, exp: u64, nonce: &str) -> Delegation {
    Delegation {
        user_address: user.address().to_string(),
        delegate_did: delegate.to_string(),
        scope: "calendar:write".into(),
        exp: exp.into(),
        nonce: nonce.into(),
    }
}
