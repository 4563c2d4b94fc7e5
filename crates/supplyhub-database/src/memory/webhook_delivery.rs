//! In-memory webhook delivery claims.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use supplyhub_core::result::AppResult;
use supplyhub_entity::webhook::WebhookProvider;

use crate::store::WebhookDeliveryStore;

/// In-memory [`WebhookDeliveryStore`].
#[derive(Debug, Default)]
pub struct MemoryWebhookDeliveryStore {
    deliveries: RwLock<HashMap<(WebhookProvider, String), DateTime<Utc>>>,
}

#[async_trait]
impl WebhookDeliveryStore for MemoryWebhookDeliveryStore {
    async fn claim(&self, provider: WebhookProvider, event_id: &str) -> AppResult<bool> {
        let mut guard = self.deliveries.write().await;
        let key = (provider, event_id.to_string());
        if guard.contains_key(&key) {
            return Ok(false);
        }
        guard.insert(key, Utc::now());
        Ok(true)
    }

    async fn release(&self, provider: WebhookProvider, event_id: &str) -> AppResult<()> {
        self.deliveries
            .write()
            .await
            .remove(&(provider, event_id.to_string()));
        Ok(())
    }

    async fn purge_older_than(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let mut guard = self.deliveries.write().await;
        let len = guard.len();
        guard.retain(|_, received_at| *received_at >= before);
        Ok((len - guard.len()) as u64)
    }
}
