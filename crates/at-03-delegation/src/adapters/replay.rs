//! # Nonce Replay Guard
//!
//! Opt-in, in-memory. A `(userAddress, nonce)` pair is remembered until the
//! delegation's `exp`, after which the slot is purged and may be reused.

use crate::domain::entities::{unix_word, DelegationEnvelope, VerifiedUser};
use parking_lot::Mutex;
use primitive_types::U256;
use std::collections::HashMap;
use tracing::warn;

type NonceKey = (String, String);

/// Rejects a second valid delegation with the same user and nonce.
#[derive(Debug, Default)]
pub struct NonceReplayGuard {
    seen: Mutex<HashMap<NonceKey, U256>>,
}

impl NonceReplayGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a use of `envelope`.
    ///
    /// Returns `true` only for the first use of a valid delegation's nonce.
    /// Invalid delegations are never recorded, so a forged envelope cannot
    /// burn a legitimate user's nonce.
    pub fn admit(
        &self,
        envelope: &DelegationEnvelope,
        verified: &VerifiedUser,
        now_secs: i64,
    ) -> bool {
        if !verified.valid {
            return false;
        }

        let delegation = &envelope.delegation;
        let key = (
            delegation.user_address.to_ascii_lowercase(),
            delegation.nonce.clone(),
        );

        let now = unix_word(now_secs);
        let mut seen = self.seen.lock();
        seen.retain(|_, exp| *exp >= now);

        if seen.contains_key(&key) {
            warn!(
                user = %key.0,
                nonce = %key.1,
                "Delegation nonce replayed"
            );
            return false;
        }
        seen.insert(key, delegation.exp);
        true
    }

    /// Nonces currently remembered.
    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
