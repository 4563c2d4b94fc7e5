//! Inventory item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use supplyhub_core::types::{InventoryItemId, UserId};

/// A tracked stock item owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InventoryItem {
    /// Unique item identifier.
    pub id: InventoryItemId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Storefront SKU.
    pub sku: Option<String>,
    /// ERP item id.
    pub sap_item_id: Option<String>,
    /// Units on hand. May go negative when orders outrun stock.
    pub quantity: i64,
    /// Minimum stock before an alert is raised.
    pub min_amount: i64,
    /// Unit sale price.
    pub price: f64,
    /// Unit cost.
    pub unit_cost: f64,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Whether stock is at or below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_amount
    }
}

/// Authoritative values reported by the ERP system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub quantity: i64,
    pub price: f64,
    pub unit_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_stock_is_inclusive() {
        let mut item = InventoryItem {
            id: InventoryItemId::new(),
            user_id: UserId::new(),
            name: "Widget".into(),
            sku: Some("W-1".into()),
            sap_item_id: None,
            quantity: 5,
            min_amount: 5,
            price: 10.0,
            unit_cost: 4.0,
            updated_at: Utc::now(),
        };
        assert!(item.is_low_stock());
        item.quantity = 6;
        assert!(!item.is_low_stock());
    }
}
