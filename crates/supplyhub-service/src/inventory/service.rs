//! Inventory snapshot and delta application.

use std::sync::Arc;

use tracing::{debug, info};

use supplyhub_core::error::AppError;
use supplyhub_core::result::AppResult;
use supplyhub_core::types::UserId;
use supplyhub_database::InventoryStore;
use supplyhub_entity::inventory::{InventoryItem, InventorySnapshot};

/// Applies inventory changes reported by integrations.
///
/// Each call is one find-and-update on a single item; an absent item is
/// `Ok(None)`, never an implicit insert.
#[derive(Debug, Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
}

impl InventoryService {
    /// Creates a new inventory service.
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Overwrite an item's stock figures from an authoritative ERP snapshot.
    pub async fn apply_snapshot(
        &self,
        user_id: UserId,
        sap_item_id: &str,
        snapshot: InventorySnapshot,
    ) -> AppResult<Option<InventoryItem>> {
        if snapshot.quantity < 0 {
            return Err(AppError::validation("quantity must not be negative"));
        }
        if !snapshot.price.is_finite() || !snapshot.unit_cost.is_finite() {
            return Err(AppError::validation("price and unit cost must be finite numbers"));
        }

        let updated = self
            .store
            .apply_snapshot(user_id, sap_item_id, snapshot)
            .await?;
        match &updated {
            Some(item) => info!(
                user_id = %user_id,
                item_id = %item.id,
                sap_item_id,
                quantity = item.quantity,
                "Inventory snapshot applied"
            ),
            None => debug!(user_id = %user_id, sap_item_id, "No inventory item for snapshot"),
        }
        Ok(updated)
    }

    /// Add `delta` to the quantity of the item with `sku`.
    pub async fn apply_delta(
        &self,
        user_id: UserId,
        sku: &str,
        delta: i64,
    ) -> AppResult<Option<InventoryItem>> {
        let updated = self.store.apply_delta(user_id, sku, delta).await?;
        if let Some(item) = &updated {
            debug!(
                user_id = %user_id,
                item_id = %item.id,
                sku,
                delta,
                quantity = item.quantity,
                "Inventory delta applied"
            );
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use supplyhub_core::types::InventoryItemId;
    use supplyhub_database::memory::MemoryInventoryStore;

    async fn seeded(user_id: UserId) -> (InventoryService, InventoryItem) {
        let store = Arc::new(MemoryInventoryStore::default());
        let item = store
            .insert(InventoryItem {
                id: InventoryItemId::new(),
                user_id,
                name: "Widget".into(),
                sku: Some("W-1".into()),
                sap_item_id: Some("SAP-1".into()),
                quantity: 10,
                min_amount: 3,
                price: 9.5,
                unit_cost: 4.0,
                updated_at: Utc::now(),
            })
            .await
            .unwrap();
        (InventoryService::new(store), item)
    }

    #[tokio::test]
    async fn test_snapshot_overwrites_figures() {
        let user = UserId::new();
        let (svc, item) = seeded(user).await;
        let snapshot = InventorySnapshot {
            quantity: 2,
            price: 11.0,
            unit_cost: 5.0,
        };

        let updated = svc.apply_snapshot(user, "SAP-1", snapshot).await.unwrap().unwrap();
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.quantity, 2);
        assert_eq!(updated.price, 11.0);
        assert!(updated.is_low_stock());
    }

    #[tokio::test]
    async fn test_negative_snapshot_rejected() {
        let user = UserId::new();
        let (svc, _) = seeded(user).await;
        let snapshot = InventorySnapshot {
            quantity: -1,
            price: 1.0,
            unit_cost: 1.0,
        };
        let err = svc.apply_snapshot(user, "SAP-1", snapshot).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_delta_on_unknown_sku_is_none() {
        let user = UserId::new();
        let (svc, _) = seeded(user).await;
        assert!(svc.apply_delta(user, "NOPE", -1).await.unwrap().is_none());
        let updated = svc.apply_delta(user, "W-1", -4).await.unwrap().unwrap();
        assert_eq!(updated.quantity, 6);
    }

    #[tokio::test]
    async fn test_other_users_item_untouched() {
        let (svc, _) = seeded(UserId::new()).await;
        assert!(svc.apply_delta(UserId::new(), "W-1", -1).await.unwrap().is_none());
    }
}
