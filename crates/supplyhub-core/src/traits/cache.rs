//! Cache provider trait for pluggable caching backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for cache backends (Redis or in-memory).
///
/// The cache holds expiring integer counters. The provider is responsible for
/// key prefixing and TTL enforcement, and `incr` must be atomic with respect
/// to other callers of the same backend.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Increment a counter by 1, creating it if absent. Returns the new value.
    async fn incr(&self, key: &str) -> AppResult<i64>;

    /// Set the TTL on an existing key. Returns `false` if the key is absent.
    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool>;

    /// Check that the cache backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
