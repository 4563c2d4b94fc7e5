//! Processed webhook delivery repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use supplyhub_core::error::{AppError, ErrorKind};
use supplyhub_core::result::AppResult;
use supplyhub_entity::webhook::WebhookProvider;

use crate::store::WebhookDeliveryStore;

/// PostgreSQL-backed [`WebhookDeliveryStore`].
#[derive(Debug, Clone)]
pub struct WebhookDeliveryRepository {
    pool: PgPool,
}

impl WebhookDeliveryRepository {
    /// Create a new delivery repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WebhookDeliveryStore for WebhookDeliveryRepository {
    async fn claim(&self, provider: WebhookProvider, event_id: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO webhook_deliveries (provider, event_id) VALUES ($1, $2) \
             ON CONFLICT (provider, event_id) DO NOTHING",
        )
        .bind(provider.as_str())
        .bind(event_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim delivery", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn release(&self, provider: WebhookProvider, event_id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM webhook_deliveries WHERE provider = $1 AND event_id = $2")
            .bind(provider.as_str())
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to release delivery", e)
            })?;
        Ok(())
    }

    async fn purge_older_than(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM webhook_deliveries WHERE received_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge deliveries", e)
            })?;
        Ok(result.rows_affected())
    }
}
