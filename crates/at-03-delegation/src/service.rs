//! # Delegation Service
//!
//! Implements `DelegationApi` for one EIP-712 domain and clock.

use crate::domain::eip712::Eip712Domain;
use crate::domain::entities::{Delegation, DelegationEnvelope, VerifiedUser};
use crate::domain::errors::DelegationError;
use crate::domain::verification::evaluate;
use crate::ports::inbound::DelegationApi;
use shared_crypto::Secp256k1KeyPair;
use shared_types::{SystemTimeSource, TimeSource};
use tracing::{debug, warn};
use trust_telemetry::{metric_inc, DELEGATION_VERIFICATIONS};

/// Delegation Service.
pub struct DelegationService<T: TimeSource = SystemTimeSource> {
    domain: Eip712Domain,
    time: T,
}

impl DelegationService {
    /// Service for the fixed delegation domain using the system clock.
    pub fn new() -> Self {
        Self::with_time_source(Eip712Domain::delegation(), SystemTimeSource)
    }
}

impl Default for DelegationService {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> DelegationService<T> {
    /// Service with an explicit domain and clock.
    pub fn with_time_source(domain: Eip712Domain, time: T) -> Self {
        Self { domain, time }
    }

    /// The domain envelopes are signed under.
    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }
}

impl<T: TimeSource> DelegationApi for DelegationService<T> {
    fn sign(
        &self,
        delegation: Delegation,
        key: &Secp256k1KeyPair,
    ) -> Result<DelegationEnvelope, DelegationError> {
        DelegationEnvelope::sign(delegation, key, &self.domain)
    }

    fn verify(
        &self,
        envelope: &DelegationEnvelope,
        expected_delegate: Option<&str>,
    ) -> VerifiedUser {
        let user = evaluate(
            envelope,
            expected_delegate,
            &self.domain,
            self.time.unix_seconds(),
        );

        match user.failure {
            None => debug!(
                user = %user.address,
                delegate = %user.delegated_to,
                scope = %user.scope,
                "Delegation verified"
            ),
            Some(failure) => warn!(
                user = %user.address,
                delegate = %user.delegated_to,
                recovered = ?user.recovered_address,
                failure = %failure,
                "Delegation rejected"
            ),
        }
        metric_inc!(DELEGATION_VERIFICATIONS, &[user.outcome_label()]);
        user
    }
}
