//! Inventory repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use supplyhub_core::error::{AppError, ErrorKind};
use supplyhub_core::result::AppResult;
use supplyhub_core::types::{InventoryItemId, UserId};
use supplyhub_entity::inventory::{InventoryItem, InventorySnapshot};

use crate::store::InventoryStore;

/// PostgreSQL-backed [`InventoryStore`].
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    /// Create a new inventory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for InventoryRepository {
    async fn insert(&self, item: InventoryItem) -> AppResult<InventoryItem> {
        sqlx::query_as::<_, InventoryItem>(
            "INSERT INTO inventory_items \
             (id, user_id, name, sku, sap_item_id, quantity, min_amount, price, unit_cost, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(item.id)
        .bind(item.user_id)
        .bind(&item.name)
        .bind(&item.sku)
        .bind(&item.sap_item_id)
        .bind(item.quantity)
        .bind(item.min_amount)
        .bind(item.price)
        .bind(item.unit_cost)
        .bind(item.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create item", e))
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: InventoryItemId,
    ) -> AppResult<Option<InventoryItem>> {
        sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory_items WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))
    }

    async fn apply_snapshot(
        &self,
        user_id: UserId,
        sap_item_id: &str,
        snapshot: InventorySnapshot,
    ) -> AppResult<Option<InventoryItem>> {
        sqlx::query_as::<_, InventoryItem>(
            "UPDATE inventory_items SET quantity = $3, price = $4, unit_cost = $5, updated_at = NOW() \
             WHERE id = (SELECT id FROM inventory_items WHERE user_id = $1 AND sap_item_id = $2 \
                         ORDER BY updated_at LIMIT 1) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(sap_item_id)
        .bind(snapshot.quantity)
        .bind(snapshot.price)
        .bind(snapshot.unit_cost)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to apply snapshot", e))
    }

    async fn apply_delta(
        &self,
        user_id: UserId,
        sku: &str,
        delta: i64,
    ) -> AppResult<Option<InventoryItem>> {
        sqlx::query_as::<_, InventoryItem>(
            "UPDATE inventory_items SET quantity = quantity + $3, updated_at = NOW() \
             WHERE id = (SELECT id FROM inventory_items WHERE user_id = $1 AND sku = $2 \
                         ORDER BY updated_at LIMIT 1) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(sku)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to apply delta", e))
    }
}
