//! # Layer 2 Attacks
//!
//! | Attack | Defense |
//! |--------|---------|
//! | Raise scope or expiry on a real grant | Fields are inside the signed struct |
//! | Claim a different user | Recovered signer must equal the claim |
//! | Re-target a grant at another agent | Delegate bound to the calling agent |
//! | Flip `s` to its high twin | Normalized before recovery; same signer |
//! | Re-present the same grant | Opt-in nonce guard |
//! | Cross-application replay | Domain separator |

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use at_03_delegation::{
        signing_digest, DelegationApi, DelegationEnvelope, DelegationFailure, DelegationService,
        Eip712Domain, NonceReplayGuard,
    };
    use at_04_inbound_auth::InboundAuthApi;
    use primitive_types::U256;
    use shared_crypto::{recover_address, RecoverableSignature};
    use shared_types::{FixedTimeSource, Message, MessagePart};

    fn grant(world: &World, delegate: &TestAgent, nonce: &str) -> DelegationEnvelope {
        let user = wallet(51);
        world
            .delegations()
            .sign(
                delegation(&user, &delegate.did, (NOW + 1800) as u64, nonce),
                &user,
            )
            .unwrap()
    }

    #[test]
    fn test_scope_escalation() {
        let world = World::new();
        let agent = TestAgent::new("agent", 52, 60.0);
        let mut envelope = grant(&world, &agent, "n-1");

        envelope.delegation.scope = "admin:*".into();

        let user = world.delegations().verify(&envelope, Some(agent.did.as_str()));
        assert!(!user.valid);
        assert_eq!(user.failure, Some(DelegationFailure::SignerMismatch));
    }

    #[test]
    fn test_expiry_extension() {
        let world = World::new();
        let agent = TestAgent::new("agent", 52, 60.0);
        let mut envelope = grant(&world, &agent, "n-1");

        envelope.delegation.exp += U256::from(86_400u64 * 365);

        assert!(!world.delegations().verify(&envelope, None).valid);
    }

    #[test]
    fn test_claiming_another_user() {
        let world = World::new();
        let agent = TestAgent::new("agent", 52, 60.0);
        let attacker = wallet(53);
        let victim = wallet(54);

        // Attacker signs a grant with its own key but names the victim
        let mut envelope = world
            .delegations()
            .sign(
                delegation(&attacker, &agent.did, (NOW + 1800) as u64, "n-1"),
                &attacker,
            )
            .unwrap();
        envelope.delegation.user_address = victim.address().to_string();

        let user = world.delegations().verify(&envelope, None);
        assert!(!user.valid);
        assert_eq!(user.address, victim.address().to_string());
        assert_ne!(user.recovered_address, Some(victim.address().to_string()));
    }

    #[tokio::test]
    async fn test_grant_stolen_by_other_agent() {
        let world = World::new();
        let intended = TestAgent::new("intended", 55, 60.0);
        let thief = TestAgent::new("thief", 56, 60.0);
        world.publish(&intended);
        world.publish(&thief);

        // Thief forwards the intended agent's grant under its own signature
        let mut message = Message::new("m-1", vec![MessagePart::text("transfer")]);
        world
            .signer(&thief)
            .sign_with_delegation(&mut message, &grant(&world, &intended, "n-1"))
            .unwrap();

        let auth = world.authenticator().authenticate(&message, None).await;
        assert!(auth.sender_authentic());
        assert!(!auth.user_authorized());
        assert_eq!(
            auth.user.unwrap().failure,
            Some(DelegationFailure::DelegateMismatch)
        );
    }

    #[test]
    fn test_high_s_twin_recovers_same_signer() {
        let world = World::new();
        let agent = TestAgent::new("agent", 52, 60.0);
        let envelope = grant(&world, &agent, "n-1");

        let original = RecoverableSignature::from_hex(&envelope.signature).unwrap();
        let twin = RecoverableSignature {
            r: original.r,
            s: negate_s(&original.s),
            v: match original.v {
                27 => 28,
                28 => 27,
                0 => 1,
                _ => 0,
            },
        };
        let digest = signing_digest(&envelope.delegation, &Eip712Domain::delegation()).unwrap();

        assert_eq!(
            recover_address(&digest, &twin).unwrap(),
            recover_address(&digest, &original).unwrap()
        );

        let malleated = DelegationEnvelope {
            delegation: envelope.delegation.clone(),
            signature: twin.to_hex(),
        };
        assert!(world
            .delegations()
            .verify(&malleated, Some(agent.did.as_str()))
            .valid);
    }

    #[test]
    fn test_replay_caught_by_nonce_guard() {
        let world = World::new();
        let agent = TestAgent::new("agent", 52, 60.0);
        let envelope = grant(&world, &agent, "n-1");
        let guard = NonceReplayGuard::new();

        let first = world.delegations().verify(&envelope, None);
        let second = world.delegations().verify(&envelope, None);

        // Verification alone accepts both uses
        assert!(first.valid && second.valid);
        assert!(guard.admit(&envelope, &first, NOW));
        assert!(!guard.admit(&envelope, &second, NOW + 1));
    }

    #[test]
    fn test_cross_application_replay() {
        let world = World::new();
        let agent = TestAgent::new("agent", 52, 60.0);
        let envelope = grant(&world, &agent, "n-1");

        let other_app = DelegationService::with_time_source(
            Eip712Domain::new("SomeOtherDapp", "1"),
            FixedTimeSource::at_unix(NOW),
        );
        assert!(!other_app.verify(&envelope, None).valid);
    }

    /// `n - s` over the secp256k1 group order.
    fn negate_s(s: &[u8; 32]) -> [u8; 32] {
        const ORDER: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C,
            0xD0, 0x36, 0x41, 0x41,
        ];
        let mut out = [0u8; 32];
        let mut borrow = 0i32;
        for i in (0..32).rev() {
            let diff = i32::from(ORDER[i]) - i32::from(s[i]) - borrow;
            borrow = i32::from(diff < 0);
            out[i] = (diff + 256 * borrow) as u8;
        }
        out
    }
}
