//! TTL cache in front of another resolver.

use crate::domain::errors::ResolveError;
use crate::ports::outbound::DidResolver;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared_crypto::Ed25519PublicKey;
use shared_types::{Did, SystemTimeSource, TimeSource};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Caches successful resolutions for `ttl`. Failures are not cached.
///
/// Stale entries are purged whenever a new key is stored.
pub struct CachingDidResolver<D: DidResolver, T: TimeSource = SystemTimeSource> {
    inner: D,
    ttl: Duration,
    time: T,
    entries: RwLock<HashMap<Did, (Ed25519PublicKey, DateTime<Utc>)>>,
}

impl<D: DidResolver> CachingDidResolver<D> {
    /// Cache in front of `inner` using the system clock.
    pub fn new(inner: D, ttl: Duration) -> Self {
        Self::with_time_source(inner, ttl, SystemTimeSource)
    }
}

impl<D: DidResolver, T: TimeSource> CachingDidResolver<D, T> {
    /// Cache with an explicit clock.
    pub fn with_time_source(inner: D, ttl: Duration, time: T) -> Self {
        Self {
            inner,
            ttl,
            time,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Drop the cached key for `did`, e.g. after a rotation notice.
    pub fn invalidate(&self, did: &Did) {
        self.entries.write().remove(did);
    }

    /// Number of cached entries. May include stale ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn cached(&self, did: &Did, now: DateTime<Utc>) -> Option<Ed25519PublicKey> {
        let entries = self.entries.read();
        let (key, cached_at) = entries.get(did)?;
        self.is_fresh(*cached_at, now).then_some(*key)
    }

    fn store(&self, did: &Did, key: Ed25519PublicKey, now: DateTime<Utc>) {
        let mut entries = self.entries.write();
        entries.retain(|_, (_, cached_at)| self.is_fresh(*cached_at, now));
        entries.insert(did.clone(), (key, now));
    }

    fn is_fresh(&self, cached_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let age_ms = (now - cached_at).num_milliseconds();
        let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        age_ms < ttl_ms
    }
}

#[async_trait]
impl<D: DidResolver, T: TimeSource> DidResolver for CachingDidResolver<D, T> {
    async fn resolve(&self, did: &Did) -> Result<Ed25519PublicKey, ResolveError> {
        let now = self.time.now();
        if let Some(key) = self.cached(did, now) {
            debug!(did = %did, "DID key served from cache");
            return Ok(key);
        }

        let key = self.inner.resolve(did).await?;
        self.store(did, key, now);
        Ok(key)
    }
}
