//! # Agent-Trust Benchmarks
//!
//! | Path | Work per call |
//! |------|---------------|
//! | Content digest | canonical JSON + SHA-256 |
//! | Sender verify | digest + Ed25519 verify (resolver in memory) |
//! | Delegation verify | EIP-712 hashing + secp256k1 recovery |

use at_02_sender_envelope::{
    compute_digest, SenderEnvelopeApi, SenderEnvelopeService, SenderIdentity, StaticDidResolver,
};
use at_03_delegation::{Delegation, DelegationApi, DelegationService};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use shared_crypto::{Ed25519KeyPair, Secp256k1KeyPair};
use shared_types::{Did, MessagePart};
use std::time::Duration;

fn parts(count: usize) -> Vec<MessagePart> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                MessagePart::text(format!("paragraph {i} of the request"))
            } else {
                MessagePart::data(json!({
                    "index": i,
                    "tags": ["a", "b"],
                    "nested": { "z": 1, "a": 2 }
                }))
            }
        })
        .collect()
}

fn bench_content_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("at-02-content-digest");

    for count in [1usize, 10, 100] {
        let parts = parts(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &parts, |b, parts| {
            b.iter(|| black_box(compute_digest(parts)))
        });
    }

    group.finish();
}

fn bench_sender_verify(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");

    let did = Did::parse("did:web:agents.example.com:bench").expect("did");
    let identity = SenderIdentity::new(did.clone(), Ed25519KeyPair::from_seed([61u8; 32]));
    let resolver = StaticDidResolver::new();
    resolver.insert(did, identity.key.public_key());
    let service = SenderEnvelopeService::new(resolver);

    let digest = compute_digest(&parts(4));
    let envelope = service.sign("bench-1", &digest, &identity);

    c.bench_function("at-02-sender-verify", |b| {
        b.iter(|| {
            runtime.block_on(async {
                black_box(
                    service
                        .verify(&envelope, &digest, Duration::from_secs(300))
                        .await,
                )
            })
        })
    });
}

fn bench_delegation_verify(c: &mut Criterion) {
    let user = Secp256k1KeyPair::from_bytes([62u8; 32]).expect("key");
    let service = DelegationService::new();
    let envelope = service
        .sign(
            Delegation {
                user_address: user.address().to_string(),
                delegate_did: "did:web:agents.example.com:bench".into(),
                scope: "calendar:read".into(),
                exp: 4_102_444_800u64.into(),
                nonce: "bench".into(),
            },
            &user,
        )
        .expect("sign");

    c.bench_function("at-03-delegation-verify", |b| {
        b.iter(|| {
            black_box(service.verify(&envelope, Some("did:web:agents.example.com:bench")))
        })
    });
}

criterion_group!(
    benches,
    bench_content_digest,
    bench_sender_verify,
    bench_delegation_verify
);
criterion_main!(benches);
