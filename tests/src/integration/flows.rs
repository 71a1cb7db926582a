//! # End-to-End Flows
//!
//! 1. **Gate**: client gates a remote agent before connecting
//! 2. **Request**: client signs a request, forwarding a user's delegation
//! 3. **Inbound**: remote agent authenticates the request on both layers
//! 4. **Response**: client verifies the signed response on its connection

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use at_01_trust_gate::{
        PolicyProvider, TomlPolicyProvider, TrustGateApi, TrustGateError, TrustGatePolicy,
    };
    use at_03_delegation::DelegationApi;
    use at_04_inbound_auth::{InboundAuthApi, RequestId, TrustedConnection, VerificationScopes};
    use shared_types::{Message, MessagePart};

    fn policy(min_trust_score: f64) -> TrustGatePolicy {
        TrustGatePolicy {
            verify_identity: true,
            require_live: true,
            min_trust_score,
            ..TrustGatePolicy::default()
        }
    }

    // =========================================================================
    // GATE
    // =========================================================================

    #[tokio::test]
    async fn test_reputable_agent_passes_gate() {
        let world = World::new();
        let remote = TestAgent::new("remote", 1, 85.0);
        world.publish(&remote);

        let snapshot = world
            .gate()
            .verify_preconditions(&remote.record, &policy(50.0))
            .await
            .unwrap();

        assert!(snapshot.did_verified);
        assert!(snapshot.is_live);
        assert_eq!(snapshot.trust_score, Some(85.0));
    }

    #[tokio::test]
    async fn test_raised_threshold_refuses_same_agent() {
        let world = World::new();
        let remote = TestAgent::new("remote", 1, 85.0);
        world.publish(&remote);

        let error = world
            .gate()
            .verify_preconditions(&remote.record, &policy(90.0))
            .await
            .unwrap_err();

        assert_eq!(
            error,
            TrustGateError::TrustScoreBelowThreshold {
                actual: Some(85.0),
                threshold: 90.0,
            }
        );
    }

    #[tokio::test]
    async fn test_policy_from_toml_drives_gate() {
        let world = World::new();
        let remote = TestAgent::new("remote", 1, 85.0);
        world.publish(&remote);

        let provider = TomlPolicyProvider::parse(
            r#"
            [trust_gate]
            verify_identity = false
            min_trust_score = 50.0
            "#,
        )
        .unwrap();

        world
            .gate()
            .verify_preconditions(&remote.record, &provider.policy())
            .await
            .unwrap();
        assert_eq!(world.registry.resolve_calls(), 0);
    }

    // =========================================================================
    // FULL ROUND TRIP
    // =========================================================================

    #[tokio::test]
    async fn test_delegated_request_and_signed_response() {
        let world = World::new();
        let client = TestAgent::new("client", 1, 70.0);
        let remote = TestAgent::new("remote", 2, 85.0);
        world.publish(&client);
        world.publish(&remote);

        // Client gates the remote agent.
        let connection =
            TrustedConnection::establish(world.gate(), remote.record.clone(), policy(50.0))
                .await
                .unwrap();

        // A wallet user authorizes the client agent.
        let user = wallet(7);
        let grant = world
            .delegations()
            .sign(
                delegation(&user, &client.did, (NOW + 1800) as u64, "n-1"),
                &user,
            )
            .unwrap();

        // Client signs the request and forwards the grant.
        let mut request = Message::new("req-1", vec![MessagePart::text("book Friday 10:00")]);
        world
            .signer(&client)
            .sign_with_delegation(&mut request, &grant)
            .unwrap();

        // Remote authenticates it inside a request scope.
        let scopes = VerificationScopes::new();
        let request_id = RequestId::new();
        let (guard, malformed) = world
            .authenticator()
            .authenticate_scoped(&scopes, request_id, &request, None)
            .await
            .unwrap();

        assert!(malformed.is_empty());
        let context = guard.context().unwrap();
        let sender = context.authentic_sender().unwrap();
        assert_eq!(sender.did, client.did);
        let authorized = context.authorized_user().unwrap();
        assert_eq!(authorized.address, user.address().to_string());
        assert_eq!(authorized.delegated_to, client.did.as_str());
        assert_eq!(authorized.scope, "calendar:write");

        drop(guard);
        assert!(scopes.is_empty());

        // Remote replies; client verifies on its connection.
        let mut response = Message::new("resp-1", vec![MessagePart::text("booked")]);
        world.signer(&remote).sign(&mut response).unwrap();

        let verified = connection
            .verify_response(&world.senders(), &response)
            .await
            .unwrap();
        assert!(verified.is_authentic());
        assert_eq!(connection.snapshot().response_verified, Some(true));
    }

    #[tokio::test]
    async fn test_request_from_unregistered_agent() {
        let world = World::new();
        let stranger = TestAgent::new("stranger", 3, 99.0);

        let mut request = Message::new("req-1", vec![MessagePart::text("hello")]);
        world.signer(&stranger).sign(&mut request).unwrap();

        let auth = world.authenticator().authenticate(&request, None).await;
        let sender = auth.sender.unwrap();
        assert!(!sender.did_resolved);
        assert!(!sender.signature_valid);
    }

    #[tokio::test]
    async fn test_delegation_without_sender_envelope() {
        let world = World::new();
        let client = TestAgent::new("client", 1, 70.0);
        let user = wallet(8);

        let mut request = Message::new("req-1", vec![MessagePart::text("hello")]);
        world
            .delegations()
            .sign(
                delegation(&user, &client.did, (NOW + 60) as u64, "n-2"),
                &user,
            )
            .unwrap()
            .attach(&mut request.metadata)
            .unwrap();

        // Calling agent unknown: the delegate check cannot bind, signature still must hold
        let unbound = world.authenticator().authenticate(&request, None).await;
        assert!(unbound.sender.is_none());
        assert!(unbound.user_authorized());

        // Transport says someone else is calling
        let other = did("other");
        let bound = world
            .authenticator()
            .authenticate(&request, Some(&other))
            .await;
        assert!(!bound.user_authorized());
    }

    #[tokio::test]
    async fn test_expired_delegation_end_to_end() {
        let world = World::new();
        let client = TestAgent::new("client", 1, 70.0);
        world.publish(&client);
        let user = wallet(9);

        let mut request = Message::new("req-1", vec![MessagePart::text("hello")]);
        let grant = world
            .delegations()
            .sign(
                delegation(&user, &client.did, (NOW - 60) as u64, "n-3"),
                &user,
            )
            .unwrap();
        world
            .signer(&client)
            .sign_with_delegation(&mut request, &grant)
            .unwrap();

        let auth = world.authenticator().authenticate(&request, None).await;
        assert!(auth.sender_authentic());
        let user = auth.user.unwrap();
        assert!(user.expired);
        assert!(!user.valid);
    }

    #[tokio::test]
    async fn test_reverify_after_reputation_drop() {
        let world = World::new();
        let remote = TestAgent::new("remote", 2, 85.0);
        world.publish(&remote);

        let connection =
            TrustedConnection::establish(world.gate(), remote.record.clone(), policy(50.0))
                .await
                .unwrap();

        let mut demoted = remote.record.clone();
        demoted.trust_score = Some(20.0);
        world.registry.insert_agent(demoted);

        assert!(connection.reverify().await.is_err());
        assert_eq!(connection.snapshot().trust_score, Some(85.0));
    }
}
