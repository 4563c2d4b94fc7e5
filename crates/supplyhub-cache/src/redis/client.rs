//! Redis connection management.

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use supplyhub_core::config::cache::RedisCacheConfig;
use supplyhub_core::error::{AppError, ErrorKind};
use supplyhub_core::result::AppResult;

/// Reconnecting Redis connection plus the configured key prefix.
#[derive(Debug, Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisClient {
    /// Connect using the configured URL.
    pub async fn connect(config: &RedisCacheConfig) -> AppResult<Self> {
        let client = Client::open(config.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to create Redis client", e)
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to connect to Redis", e)
        })?;

        info!(prefix = %config.key_prefix, "Connected to Redis");
        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// A connection handle; clones share the underlying multiplexed connection.
    pub fn conn(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Apply the configured prefix to a key.
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }
}
