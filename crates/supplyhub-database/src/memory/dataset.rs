//! In-memory Power BI dataset store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use supplyhub_core::AppError;
use supplyhub_core::result::AppResult;
use supplyhub_core::types::UserId;
use supplyhub_entity::dataset::{Dataset, RefreshRecord};

use crate::store::DatasetStore;

/// In-memory [`DatasetStore`], keyed by owner and dataset id.
#[derive(Debug, Default)]
pub struct MemoryDatasetStore {
    datasets: RwLock<HashMap<(UserId, String), Dataset>>,
}

#[async_trait]
impl DatasetStore for MemoryDatasetStore {
    async fn insert(&self, dataset: Dataset) -> AppResult<Dataset> {
        let key = (dataset.user_id, dataset.dataset_id.clone());
        let mut guard = self.datasets.write().await;
        if guard.contains_key(&key) {
            return Err(AppError::conflict(format!(
                "Dataset '{}' is already registered",
                dataset.dataset_id
            )));
        }
        guard.insert(key, dataset.clone());
        Ok(dataset)
    }

    async fn find(&self, user_id: UserId, dataset_id: &str) -> AppResult<Option<Dataset>> {
        let guard = self.datasets.read().await;
        Ok(guard.get(&(user_id, dataset_id.to_string())).cloned())
    }

    async fn record_refresh(
        &self,
        user_id: UserId,
        dataset_id: &str,
        record: RefreshRecord,
    ) -> AppResult<Option<Dataset>> {
        let mut guard = self.datasets.write().await;
        Ok(guard
            .get_mut(&(user_id, dataset_id.to_string()))
            .map(|dataset| {
                dataset.last_refresh = Some(record);
                dataset.updated_at = Utc::now();
                dataset.clone()
            }))
    }
}
