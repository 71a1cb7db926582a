//! # Layer 1 Attacks
//!
//! | Attack | Defense |
//! |--------|---------|
//! | Claim another agent's DID | Signature checked against the claimed DID's key |
//! | Edit message parts in flight | Digest recomputed from received parts |
//! | Reuse envelope on a new message id | Envelope bound to the received id |
//! | Replay an old message | Freshness window |
//! | Pre-date a message into the future | Forward skew limit |

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use at_02_sender_envelope::{
        SenderEnvelope, SenderEnvelopeApi, SenderFailure, SENDER_ENVELOPE_KEY,
    };
    use at_04_inbound_auth::InboundAuthApi;
    use chrono::DateTime;
    use serde_json::json;
    use shared_types::{Message, MessagePart};

    fn setup() -> (World, TestAgent, TestAgent) {
        let world = World::new();
        let honest = TestAgent::new("honest", 41, 80.0);
        let attacker = TestAgent::new("attacker", 42, 80.0);
        world.publish(&honest);
        world.publish(&attacker);
        (world, honest, attacker)
    }

    #[tokio::test]
    async fn test_impersonation_by_did_swap() {
        let (world, honest, attacker) = setup();
        let mut message = Message::new("m-1", vec![MessagePart::text("pay invoice 17")]);
        let mut envelope = world.signer(&attacker).sign(&mut message).unwrap();

        envelope.sender_did = honest.did.clone();
        envelope.attach(&mut message.metadata).unwrap();

        let sender = world
            .authenticator()
            .authenticate(&message, None)
            .await
            .sender
            .unwrap();
        assert_eq!(sender.did, honest.did);
        assert!(sender.did_resolved);
        assert!(!sender.signature_valid);
        assert_eq!(sender.failure, Some(SenderFailure::BadSignature));
    }

    #[tokio::test]
    async fn test_content_substitution() {
        let (world, honest, _) = setup();
        let mut message = Message::new("m-1", vec![MessagePart::text("pay invoice 17")]);
        world.signer(&honest).sign(&mut message).unwrap();

        message.parts = vec![MessagePart::text("pay invoice 18")];

        let auth = world.authenticator().authenticate(&message, None).await;
        assert!(!auth.sender_authentic());
    }

    #[tokio::test]
    async fn test_data_part_reordering_detected() {
        let (world, honest, _) = setup();
        let mut message = Message::new(
            "m-1",
            vec![
                MessagePart::data(json!({ "amount": 10 })),
                MessagePart::data(json!({ "amount": 1000 })),
            ],
        );
        world.signer(&honest).sign(&mut message).unwrap();

        message.parts.reverse();

        let auth = world.authenticator().authenticate(&message, None).await;
        assert!(!auth.sender_authentic());
    }

    #[tokio::test]
    async fn test_data_key_order_is_not_tampering() {
        let (world, honest, _) = setup();
        let mut message = Message::new(
            "m-1",
            vec![MessagePart::data(json!({ "b": 2, "a": { "y": 1, "x": 0 } }))],
        );
        world.signer(&honest).sign(&mut message).unwrap();

        // Same JSON object, rebuilt with the opposite insertion order
        message.parts = vec![MessagePart::data(json!({ "a": { "x": 0, "y": 1 }, "b": 2 }))];

        let auth = world.authenticator().authenticate(&message, None).await;
        assert!(auth.sender_authentic());
    }

    #[tokio::test]
    async fn test_envelope_lifted_onto_new_message() {
        let (world, honest, _) = setup();
        let mut original = Message::new("m-1", vec![MessagePart::text("approve")]);
        world.signer(&honest).sign(&mut original).unwrap();

        let mut forged = Message::new("m-2", original.parts.clone());
        forged.metadata = original.metadata.clone();

        let auth = world.authenticator().authenticate(&forged, None).await;
        assert!(!auth.sender_authentic());
    }

    #[tokio::test]
    async fn test_stale_replay_rejected_without_lookup() {
        let (world, honest, _) = setup();
        let mut message = Message::new("m-1", vec![MessagePart::text("approve")]);
        world.signer(&honest).sign(&mut message).unwrap();

        // Replayed ten minutes later against the same registry
        let later = World {
            registry: world.registry.clone(),
            now: NOW + 600,
        };
        let resolves_before = world.registry.resolve_calls();
        let sender = later
            .authenticator()
            .authenticate(&message, None)
            .await
            .sender
            .unwrap();

        assert_eq!(sender.failure, Some(SenderFailure::Stale));
        assert!(!sender.did_resolved);
        assert_eq!(world.registry.resolve_calls(), resolves_before);
    }

    #[tokio::test]
    async fn test_future_dated_envelope_rejected() {
        let (world, honest, _) = setup();
        let message = Message::new("m-1", vec![MessagePart::text("approve")]);
        let digest = at_02_sender_envelope::compute_digest(&message.parts);

        let envelope = SenderEnvelope::sign(
            &message.message_id,
            &digest,
            &honest.identity(),
            DateTime::from_timestamp(NOW + 120, 0).unwrap(),
        );
        let verified = world
            .senders()
            .verify(&envelope, &digest, MAX_MESSAGE_AGE)
            .await;

        assert_eq!(verified.failure, Some(SenderFailure::FromFuture));
    }

    #[tokio::test]
    async fn test_truncated_signature_reported_not_raised() {
        let (world, honest, _) = setup();
        let mut message = Message::new("m-1", vec![MessagePart::text("approve")]);
        world.signer(&honest).sign(&mut message).unwrap();

        let mut raw = message.metadata[SENDER_ENVELOPE_KEY].clone();
        raw["signature"] = json!("abcd");
        message.metadata.insert(SENDER_ENVELOPE_KEY.into(), raw);

        let sender = world
            .authenticator()
            .authenticate(&message, None)
            .await
            .sender
            .unwrap();
        assert_eq!(sender.failure, Some(SenderFailure::MalformedSignature));
    }
}
