//! Inbound port for delegation envelopes.

use crate::domain::entities::{Delegation, DelegationEnvelope, VerifiedUser};
use crate::domain::errors::DelegationError;
use shared_crypto::Secp256k1KeyPair;

/// Sign and verify per-message user delegations.
///
/// Both operations are CPU-bound; there is no driven capability to wait on.
pub trait DelegationApi: Send + Sync {
    /// Sign `delegation` with the user's key.
    fn sign(
        &self,
        delegation: Delegation,
        key: &Secp256k1KeyPair,
    ) -> Result<DelegationEnvelope, DelegationError>;

    /// Verify an envelope, optionally requiring a specific delegate DID.
    ///
    /// Never fails. Problems are reported on the returned `VerifiedUser`.
    fn verify(
        &self,
        envelope: &DelegationEnvelope,
        expected_delegate: Option<&str>,
    ) -> VerifiedUser;
}
