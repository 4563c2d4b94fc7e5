//! In-memory inventory store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use supplyhub_core::result::AppResult;
use supplyhub_core::types::{InventoryItemId, UserId};
use supplyhub_entity::inventory::{InventoryItem, InventorySnapshot};

use crate::store::InventoryStore;

/// In-memory [`InventoryStore`].
#[derive(Debug, Default)]
pub struct MemoryInventoryStore {
    items: RwLock<HashMap<InventoryItemId, InventoryItem>>,
}

impl MemoryInventoryStore {
    fn find_mut<'a>(
        items: &'a mut HashMap<InventoryItemId, InventoryItem>,
        matches: impl Fn(&InventoryItem) -> bool,
    ) -> Option<&'a mut InventoryItem> {
        items
            .values_mut()
            .filter(|item| matches(item))
            .min_by_key(|item| item.updated_at)
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn insert(&self, item: InventoryItem) -> AppResult<InventoryItem> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: InventoryItemId,
    ) -> AppResult<Option<InventoryItem>> {
        let guard = self.items.read().await;
        Ok(guard.get(&id).filter(|item| item.user_id == user_id).cloned())
    }

    async fn apply_snapshot(
        &self,
        user_id: UserId,
        sap_item_id: &str,
        snapshot: InventorySnapshot,
    ) -> AppResult<Option<InventoryItem>> {
        let mut guard = self.items.write().await;
        let item = Self::find_mut(&mut guard, |item| {
            item.user_id == user_id && item.sap_item_id.as_deref() == Some(sap_item_id)
        });
        Ok(item.map(|item| {
            item.quantity = snapshot.quantity;
            item.price = snapshot.price;
            item.unit_cost = snapshot.unit_cost;
            item.updated_at = Utc::now();
            item.clone()
        }))
    }

    async fn apply_delta(
        &self,
        user_id: UserId,
        sku: &str,
        delta: i64,
    ) -> AppResult<Option<InventoryItem>> {
        let mut guard = self.items.write().await;
        let item = Self::find_mut(&mut guard, |item| {
            item.user_id == user_id && item.sku.as_deref() == Some(sku)
        });
        Ok(item.map(|item| {
            item.quantity = item.quantity.saturating_add(delta);
            item.updated_at = Utc::now();
            item.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(user_id: UserId, sku: &str, sap: &str, quantity: i64) -> InventoryItem {
        InventoryItem {
            id: InventoryItemId::new(),
            user_id,
            name: format!("Item {sku}"),
            sku: Some(sku.into()),
            sap_item_id: Some(sap.into()),
            quantity,
            min_amount: 5,
            price: 10.0,
            unit_cost: 4.0,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_delta_is_scoped_to_owner() {
        let store = MemoryInventoryStore::default();
        let owner = UserId::new();
        let stranger = UserId::new();
        store.insert(item(owner, "W-1", "SAP-1", 10)).await.unwrap();

        assert!(store.apply_delta(stranger, "W-1", -6).await.unwrap().is_none());
        let updated = store.apply_delta(owner, "W-1", -6).await.unwrap().unwrap();
        assert_eq!(updated.quantity, 4);
    }

    #[tokio::test]
    async fn test_extreme_delta_saturates() {
        let store = MemoryInventoryStore::default();
        let owner = UserId::new();
        store.insert(item(owner, "W-1", "SAP-1", -10)).await.unwrap();

        let updated = store.apply_delta(owner, "W-1", i64::MIN).await.unwrap().unwrap();
        assert_eq!(updated.quantity, i64::MIN);
    }

    #[tokio::test]
    async fn test_snapshot_overwrites_values() {
        let store = MemoryInventoryStore::default();
        let owner = UserId::new();
        store.insert(item(owner, "W-1", "SAP-1", 10)).await.unwrap();

        let snapshot = InventorySnapshot {
            quantity: 42,
            price: 12.5,
            unit_cost: 6.0,
        };
        let updated = store
            .apply_snapshot(owner, "SAP-1", snapshot)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 42);
        assert_eq!(updated.price, 12.5);
        assert!(store.apply_snapshot(owner, "SAP-9", snapshot).await.unwrap().is_none());
    }
}
