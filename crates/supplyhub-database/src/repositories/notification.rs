//! Notification repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use supplyhub_core::error::{AppError, ErrorKind};
use supplyhub_core::result::AppResult;
use supplyhub_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use supplyhub_entity::notification::{NewNotification, Notification, NotificationPayload};

use crate::store::NotificationStore;

/// Row shape of the `notifications` table.
#[derive(Debug, FromRow)]
struct NotificationRow {
    id: NotificationId,
    user_id: UserId,
    kind: String,
    title: String,
    message: String,
    payload: serde_json::Value,
    is_read: bool,
    read_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            message: row.message,
            payload: NotificationPayload::from_parts(&row.kind, row.payload)?,
            read: row.is_read,
            read_at: row.read_at,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL-backed [`NotificationStore`].
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(&self, new: NewNotification) -> AppResult<Notification> {
        let (kind, payload) = new.payload.to_parts()?;
        let row = sqlx::query_as::<_, NotificationRow>(
            "INSERT INTO notifications (id, user_id, kind, title, message, payload) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(NotificationId::new())
        .bind(new.user_id)
        .bind(kind.as_str())
        .bind(&new.title)
        .bind(&new.message)
        .bind(&payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))?;
        row.try_into()
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
            })?;

        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT * FROM notifications WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))?;

        let items = rows
            .into_iter()
            .map(Notification::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(PageResponse::new(items, page, total as u64))
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))?;
        Ok(count as u64)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> AppResult<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>(
            "UPDATE notifications SET is_read = TRUE, read_at = COALESCE(read_at, NOW()) \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        row.map(Notification::try_from).transpose()
    }

    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW() \
             WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: NotificationId, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_older_than(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE created_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge notifications", e)
            })?;
        Ok(result.rows_affected())
    }

    async fn trim_per_user(&self, keep: u32) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM notifications WHERE id IN (\
                SELECT id FROM (\
                    SELECT id, ROW_NUMBER() OVER (PARTITION BY user_id ORDER BY created_at DESC, id DESC) AS rank \
                    FROM notifications\
                ) ranked WHERE ranked.rank > $1\
             )",
        )
        .bind(i64::from(keep))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to trim notifications", e))?;
        Ok(result.rows_affected())
    }
}
