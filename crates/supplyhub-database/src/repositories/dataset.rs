//! BI dataset repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use supplyhub_core::error::{AppError, ErrorKind};
use supplyhub_core::result::AppResult;
use supplyhub_core::types::UserId;
use supplyhub_entity::dataset::{Dataset, RefreshRecord};

use crate::store::DatasetStore;

#[derive(Debug, FromRow)]
struct DatasetRow {
    user_id: UserId,
    dataset_id: String,
    name: String,
    last_refresh: Option<Json<RefreshRecord>>,
    updated_at: DateTime<Utc>,
}

impl From<DatasetRow> for Dataset {
    fn from(row: DatasetRow) -> Self {
        Dataset {
            user_id: row.user_id,
            dataset_id: row.dataset_id,
            name: row.name,
            last_refresh: row.last_refresh.map(|json| json.0),
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL-backed [`DatasetStore`].
#[derive(Debug, Clone)]
pub struct DatasetRepository {
    pool: PgPool,
}

impl DatasetRepository {
    /// Create a new dataset repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatasetStore for DatasetRepository {
    async fn insert(&self, dataset: Dataset) -> AppResult<Dataset> {
        sqlx::query_as::<_, DatasetRow>(
            "INSERT INTO bi_datasets (user_id, dataset_id, name, last_refresh, updated_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(dataset.user_id)
        .bind(&dataset.dataset_id)
        .bind(&dataset.name)
        .bind(dataset.last_refresh.as_ref().map(Json))
        .bind(dataset.updated_at)
        .fetch_one(&self.pool)
        .await
        .map(Dataset::from)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to register dataset", e))
    }

    async fn find(&self, user_id: UserId, dataset_id: &str) -> AppResult<Option<Dataset>> {
        sqlx::query_as::<_, DatasetRow>(
            "SELECT * FROM bi_datasets WHERE user_id = $1 AND dataset_id = $2",
        )
        .bind(user_id)
        .bind(dataset_id)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Dataset::from))
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find dataset", e))
    }

    async fn record_refresh(
        &self,
        user_id: UserId,
        dataset_id: &str,
        record: RefreshRecord,
    ) -> AppResult<Option<Dataset>> {
        sqlx::query_as::<_, DatasetRow>(
            "UPDATE bi_datasets SET last_refresh = $3, updated_at = NOW() \
             WHERE user_id = $1 AND dataset_id = $2 RETURNING *",
        )
        .bind(user_id)
        .bind(dataset_id)
        .bind(Json(&record))
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Dataset::from))
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record refresh", e))
    }
}
