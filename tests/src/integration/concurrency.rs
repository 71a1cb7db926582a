//! # Concurrency
//!
//! Request-scoped results under concurrent load, and cancellation of slow
//! registry calls.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use at_01_trust_gate::{
        InMemoryAgentRegistry, TrustGateError, TrustGatePolicy, TrustGateService,
    };
    use at_02_sender_envelope::{SenderEnvelopeService, SenderFailure};
    use at_04_inbound_auth::{RegistryDidResolver, RequestId, VerificationScopes};
    use shared_types::{FixedTimeSource, Message, MessagePart};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_requests_never_see_each_other() {
        let world = Arc::new(World::new());
        let agents: Vec<TestAgent> = (1..=8)
            .map(|i| TestAgent::new(&format!("agent-{i}"), i, 50.0))
            .collect();
        for agent in &agents {
            world.publish(agent);
        }
        let authenticator = Arc::new(world.authenticator());
        let scopes = VerificationScopes::new();

        let mut handles = Vec::new();
        for (i, agent) in agents.iter().enumerate() {
            for round in 0..4 {
                let mut message = Message::new(
                    format!("m-{i}-{round}"),
                    vec![MessagePart::text(format!("payload {i}/{round}"))],
                );
                world.signer(agent).sign(&mut message).unwrap();

                let expected = agent.did.clone();
                let authenticator = authenticator.clone();
                let scopes = scopes.clone();
                handles.push(tokio::spawn(async move {
                    let request_id = RequestId::new();
                    let (guard, _) = authenticator
                        .authenticate_scoped(&scopes, request_id, &message, None)
                        .await
                        .unwrap();
                    tokio::task::yield_now().await;
                    assert_eq!(scopes.sender(&request_id).unwrap().did, expected);
                    assert_eq!(guard.sender().unwrap().did, expected);
                }));
            }
        }

        for handle in handles {
            handle.await.unwrap();
        }
        assert!(scopes.is_empty());
    }

    #[tokio::test]
    async fn test_aborted_handler_releases_scope() {
        let world = World::new();
        let agent = TestAgent::new("agent", 4, 50.0);
        world.publish(&agent);
        let mut message = Message::new("m-1", vec![MessagePart::text("hi")]);
        world.signer(&agent).sign(&mut message).unwrap();

        let authenticator = Arc::new(world.authenticator());
        let scopes = VerificationScopes::new();
        let request_id = RequestId::new();

        let task = {
            let scopes = scopes.clone();
            tokio::spawn(async move {
                let (_guard, _) = authenticator
                    .authenticate_scoped(&scopes, request_id, &message, None)
                    .await
                    .unwrap();
                std::future::pending::<()>().await;
            })
        };

        while scopes.get(&request_id).is_none() {
            tokio::task::yield_now().await;
        }
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        assert!(scopes.get(&request_id).is_none());
    }

    #[tokio::test]
    async fn test_cancelled_gate_surfaces_typed_failure() {
        let registry = Arc::new(InMemoryAgentRegistry::new().with_latency(Duration::from_secs(30)));
        let agent = TestAgent::new("slow", 5, 90.0);
        registry.insert_agent(agent.record.clone());
        registry.insert_document(agent.document());
        let gate = TrustGateService::with_time_source(registry, FixedTimeSource::at_unix(NOW));

        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result = gate
            .verify_preconditions_cancellable(
                &agent.record,
                &TrustGatePolicy::default(),
                &token,
            )
            .await;
        assert_eq!(result.unwrap_err(), TrustGateError::Cancelled);
    }

    #[tokio::test]
    async fn test_slow_registry_times_out_sender_resolution() {
        let registry = Arc::new(InMemoryAgentRegistry::new().with_latency(Duration::from_secs(30)));
        let agent = TestAgent::new("slow", 6, 90.0);
        registry.insert_document(agent.document());
        let senders = SenderEnvelopeService::with_time_source(
            RegistryDidResolver::new(registry),
            FixedTimeSource::at_unix(NOW),
        );

        let mut message = Message::new("m-1", vec![MessagePart::text("hi")]);
        let envelope = World::new().signer(&agent).sign(&mut message).unwrap();
        let digest = at_02_sender_envelope::compute_digest(&message.parts);

        let verified = senders
            .verify_with_timeout(&envelope, &digest, MAX_MESSAGE_AGE, Duration::from_millis(20))
            .await;
        assert_eq!(verified.failure, Some(SenderFailure::ResolutionTimedOut));
        assert!(!verified.did_resolved);
    }
}
