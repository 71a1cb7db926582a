//! Pure delegation checks.
//!
//! Failure precedence when several checks fail: expiry, delegate, recovery,
//! signer. Every check still runs so the flags on `VerifiedUser` are complete.

use crate::domain::eip712::Eip712Domain;
use crate::domain::entities::{DelegationEnvelope, DelegationFailure, VerifiedUser};
use crate::domain::envelope::signing_digest;
use shared_crypto::{recover_address, Address, RecoverableSignature};

/// Evaluate `envelope` at `now_secs` (unix seconds).
///
/// `expected_delegate` of `None` skips the delegate check.
pub fn evaluate(
    envelope: &DelegationEnvelope,
    expected_delegate: Option<&str>,
    domain: &Eip712Domain,
    now_secs: i64,
) -> VerifiedUser {
    let delegation = &envelope.delegation;

    let expired = delegation.expired_at(now_secs);
    let delegate_matches = expected_delegate.map_or(true, |did| did == delegation.delegate_did);
    let recovered = recover(envelope, domain);

    let failure = if expired {
        Some(DelegationFailure::Expired)
    } else if !delegate_matches {
        Some(DelegationFailure::DelegateMismatch)
    } else {
        match &recovered {
            None => Some(DelegationFailure::Unrecoverable),
            Some(address) if !claims(delegation.user_address.as_str(), address) => {
                Some(DelegationFailure::SignerMismatch)
            }
            Some(_) => None,
        }
    };

    VerifiedUser {
        address: delegation.user_address.clone(),
        delegated_to: delegation.delegate_did.clone(),
        scope: delegation.scope.clone(),
        valid: failure.is_none(),
        expired,
        recovered_address: recovered.map(|address| address.to_string()),
        failure,
    }
}

fn recover(envelope: &DelegationEnvelope, domain: &Eip712Domain) -> Option<Address> {
    let digest = signing_digest(&envelope.delegation, domain).ok()?;
    let signature = RecoverableSignature::from_hex(&envelope.signature).ok()?;
    recover_address(&digest, &signature).ok()
}

/// Case-insensitive comparison of the claimed address with the recovered one.
fn claims(claimed: &str, recovered: &Address) -> bool {
    recovered.to_string().eq_ignore_ascii_case(claimed)
}
