//! User repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use supplyhub_core::error::{AppError, ErrorKind};
use supplyhub_core::result::AppResult;
use supplyhub_core::types::UserId;
use supplyhub_entity::integration::{IntegrationCategory, IntegrationSettings, Integrations};
use supplyhub_entity::user::User;

use crate::store::{IntegrationQuery, UserStore};

#[derive(Debug, FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    display_name: Option<String>,
    integrations: Json<Integrations>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            integrations: row.integrations.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: User) -> AppResult<User> {
        sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, email, display_name, integrations, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(Json(&user.integrations))
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map(User::from)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create user", e))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    async fn find_by_integration(&self, query: &IntegrationQuery) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            "SELECT * FROM users \
             WHERE integrations -> $1 ->> 'service' IS NOT NULL \
               AND ($2::text IS NULL OR integrations -> $1 ->> 'service' = $2) \
               AND ($3::uuid IS NULL OR id = $3) \
               AND ($4::text IS NULL OR split_part(regexp_replace(\
                        lower(trim(integrations -> $1 -> 'credentials' ->> 'store_url')), \
                        '^https?://', ''), '/', 1) = lower(trim($4))) \
             ORDER BY COALESCE((integrations -> $1 ->> 'enabled')::boolean, FALSE) DESC, created_at ASC \
             LIMIT 1",
        )
        .bind(query.category.as_str())
        .bind(query.service.map(|s| s.as_str()))
        .bind(query.owner)
        .bind(query.store_domain.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(User::from))
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by integration", e)
        })
    }

    async fn update_integration(
        &self,
        id: UserId,
        category: IntegrationCategory,
        settings: IntegrationSettings,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            "UPDATE users SET integrations = jsonb_set(integrations, ARRAY[$2::text], $3, true), \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(category.as_str())
        .bind(Json(&settings))
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(User::from))
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update integration", e))
    }
}
