//! Dataset refresh outcomes.

use std::sync::Arc;

use tracing::{debug, info};

use supplyhub_core::error::AppError;
use supplyhub_core::result::AppResult;
use supplyhub_core::types::UserId;
use supplyhub_database::DatasetStore;
use supplyhub_entity::dataset::{Dataset, RefreshRecord};

/// Tracks the last refresh of each registered BI dataset.
#[derive(Debug, Clone)]
pub struct DatasetService {
    store: Arc<dyn DatasetStore>,
}

impl DatasetService {
    /// Creates a new dataset service.
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self { store }
    }

    /// Find one of the user's datasets.
    pub async fn find(&self, user_id: UserId, dataset_id: &str) -> AppResult<Option<Dataset>> {
        self.store.find(user_id, dataset_id).await
    }

    /// Store a refresh outcome. Unknown datasets are left alone.
    pub async fn record_refresh(
        &self,
        user_id: UserId,
        dataset_id: &str,
        record: RefreshRecord,
    ) -> AppResult<Option<Dataset>> {
        if record.end_time.is_some_and(|end| end < record.start_time) {
            return Err(AppError::validation("endTime must not precede startTime"));
        }

        let status = record.status;
        let updated = self.store.record_refresh(user_id, dataset_id, record).await?;
        match &updated {
            Some(_) => info!(user_id = %user_id, dataset_id, status = status.as_str(), "Dataset refresh recorded"),
            None => debug!(user_id = %user_id, dataset_id, "Refresh for unregistered dataset"),
        }
        Ok(updated)
    }
}
