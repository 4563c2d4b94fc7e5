//! In-memory counter store backed by moka.

use std::future::ready;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};

use supplyhub_core::config::cache::MemoryCacheConfig;
use supplyhub_core::result::AppResult;
use supplyhub_core::traits::CacheProvider;

#[derive(Debug, Clone, Copy)]
struct Counter {
    value: i64,
    expires_at: Instant,
}

/// Evicts each counter at its own deadline.
struct CounterDeadline;

impl Expiry<String, Counter> for CounterDeadline {
    fn expire_after_create(&self, _key: &String, value: &Counter, created_at: Instant) -> Option<Duration> {
        Some(value.expires_at.saturating_duration_since(created_at))
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Counter,
        updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.expires_at.saturating_duration_since(updated_at))
    }
}

/// In-memory cache provider.
///
/// Counters are updated under moka's per-key lock, so `incr` is atomic per
/// key. Expired windows are evicted by the cache and the total number of
/// live counters is bounded by `max_capacity`.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    counters: Cache<String, Counter>,
    default_ttl: Duration,
}

impl MemoryCacheProvider {
    /// Create a provider from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let counters = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(CounterDeadline)
            .build();

        Self {
            counters,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn incr(&self, key: &str) -> AppResult<i64> {
        let default_ttl = self.default_ttl;
        let entry = self
            .counters
            .entry_by_ref(key)
            .and_upsert_with(|current| {
                let now = Instant::now();
                let next = match current.map(|entry| entry.into_value()) {
                    Some(counter) if counter.expires_at > now => Counter {
                        value: counter.value.saturating_add(1),
                        ..counter
                    },
                    _ => Counter {
                        value: 1,
                        expires_at: now + default_ttl,
                    },
                };
                ready(next)
            })
            .await;
        Ok(entry.into_value().value)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        let result = self
            .counters
            .entry_by_ref(key)
            .and_compute_with(|current| {
                let op = match current {
                    Some(entry) => Op::Put(Counter {
                        expires_at: Instant::now() + ttl,
                        ..entry.into_value()
                    }),
                    None => Op::Nop,
                };
                ready(op)
            })
            .await;
        Ok(matches!(result, CompResult::ReplacedWith(_)))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
