//! Store traits, one per aggregate.
//!
//! Every mutating method is a single find-and-update against one entity so
//! concurrent webhook deliveries never lose updates. Methods that target an
//! entity by key return `Ok(None)` when nothing matched.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use supplyhub_core::result::AppResult;
use supplyhub_core::types::{
    InventoryItemId, NotificationId, PageRequest, PageResponse, UserId, WarehouseId,
};
use supplyhub_entity::dataset::{Dataset, RefreshRecord};
use supplyhub_entity::integration::{IntegrationCategory, IntegrationService, IntegrationSettings};
use supplyhub_entity::inventory::{InventoryItem, InventorySnapshot};
use supplyhub_entity::notification::{NewNotification, Notification};
use supplyhub_entity::user::User;
use supplyhub_entity::warehouse::{TemperatureReading, Warehouse};
use supplyhub_entity::webhook::WebhookProvider;

/// Persisted per-user notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync + Debug {
    /// Insert a new unread notification.
    async fn insert(&self, new: NewNotification) -> AppResult<Notification>;

    /// List a user's notifications, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count a user's unread notifications.
    async fn count_unread(&self, user_id: UserId) -> AppResult<u64>;

    /// Mark one notification read if it belongs to `user_id`.
    ///
    /// Already-read notifications keep their original `read_at`.
    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> AppResult<Option<Notification>>;

    /// Mark every unread notification of a user read. Returns how many changed.
    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64>;

    /// Delete one notification if it belongs to `user_id`.
    async fn delete(&self, id: NotificationId, user_id: UserId) -> AppResult<bool>;

    /// Delete notifications created before `before`.
    async fn delete_older_than(&self, before: DateTime<Utc>) -> AppResult<u64>;

    /// Keep only the newest `keep` notifications of each user.
    async fn trim_per_user(&self, keep: u32) -> AppResult<u64>;
}

/// Predicate locating the user that owns an integration.
///
/// Matches users whose slot for `category` is filled by `service` (when
/// given), whose store URL matches `store_domain` (when given), and whose id
/// is `owner` (when given). Enabled slots are preferred over disabled ones,
/// then older accounts over newer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationQuery {
    pub category: IntegrationCategory,
    pub service: Option<IntegrationService>,
    pub store_domain: Option<String>,
    pub owner: Option<UserId>,
}

impl IntegrationQuery {
    /// Match any service in a category.
    pub fn category(category: IntegrationCategory) -> Self {
        Self {
            category,
            service: None,
            store_domain: None,
            owner: None,
        }
    }

    /// Match one service in its own category.
    pub fn service(service: IntegrationService) -> Self {
        Self {
            service: Some(service),
            ..Self::category(service.category())
        }
    }

    /// Narrow to a store domain.
    pub fn with_store_domain(mut self, domain: impl Into<String>) -> Self {
        self.store_domain = Some(domain.into());
        self
    }

    /// Narrow to one user.
    pub fn with_owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Evaluate the predicate against a user record.
    pub fn matches(&self, user: &User) -> bool {
        let slot = user.integrations.get(self.category);
        if slot.service.is_none() {
            return false;
        }
        if self.service.is_some() && slot.service != self.service {
            return false;
        }
        if self.owner.is_some_and(|owner| owner != user.id) {
            return false;
        }
        match &self.store_domain {
            Some(domain) => slot
                .credentials
                .as_ref()
                .is_some_and(|creds| creds.matches_store(domain)),
            None => true,
        }
    }
}

/// Users and their integration registrations.
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Insert a user.
    async fn insert(&self, user: User) -> AppResult<User>;

    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find the user matching an integration predicate.
    async fn find_by_integration(&self, query: &IntegrationQuery) -> AppResult<Option<User>>;

    /// Replace one integration slot.
    async fn update_integration(
        &self,
        id: UserId,
        category: IntegrationCategory,
        settings: IntegrationSettings,
    ) -> AppResult<Option<User>>;
}

/// Tracked inventory.
#[async_trait]
pub trait InventoryStore: Send + Sync + Debug {
    /// Insert an item.
    async fn insert(&self, item: InventoryItem) -> AppResult<InventoryItem>;

    /// Find an item owned by `user_id`.
    async fn find_by_id(
        &self,
        user_id: UserId,
        id: InventoryItemId,
    ) -> AppResult<Option<InventoryItem>>;

    /// Overwrite quantity, price, and unit cost of the item with `sap_item_id`.
    async fn apply_snapshot(
        &self,
        user_id: UserId,
        sap_item_id: &str,
        snapshot: InventorySnapshot,
    ) -> AppResult<Option<InventoryItem>>;

    /// Add `delta` (usually negative) to the quantity of the item with `sku`.
    async fn apply_delta(
        &self,
        user_id: UserId,
        sku: &str,
        delta: i64,
    ) -> AppResult<Option<InventoryItem>>;
}

/// Warehouses and their zones.
#[async_trait]
pub trait WarehouseStore: Send + Sync + Debug {
    /// Insert a warehouse with its zones.
    async fn insert(&self, warehouse: Warehouse) -> AppResult<Warehouse>;

    /// Find a warehouse by id regardless of owner.
    async fn find_by_id(&self, id: WarehouseId) -> AppResult<Option<Warehouse>>;

    /// Record a reading on the zone bound to `sensor_id`.
    ///
    /// Returns `None` and leaves the warehouse untouched when the warehouse
    /// does not belong to `user_id` or no zone is bound to the sensor.
    async fn record_temperature(
        &self,
        user_id: UserId,
        warehouse_id: WarehouseId,
        sensor_id: &str,
        reading: TemperatureReading,
    ) -> AppResult<Option<Warehouse>>;
}

/// Registered BI datasets.
#[async_trait]
pub trait DatasetStore: Send + Sync + Debug {
    /// Register a dataset.
    async fn insert(&self, dataset: Dataset) -> AppResult<Dataset>;

    /// Find a dataset registered by `user_id`.
    async fn find(&self, user_id: UserId, dataset_id: &str) -> AppResult<Option<Dataset>>;

    /// Replace the last-refresh record of a dataset.
    async fn record_refresh(
        &self,
        user_id: UserId,
        dataset_id: &str,
        record: RefreshRecord,
    ) -> AppResult<Option<Dataset>>;
}

/// Processed webhook deliveries.
#[async_trait]
pub trait WebhookDeliveryStore: Send + Sync + Debug {
    /// Claim a delivery. Returns `false` if it was already claimed.
    async fn claim(&self, provider: WebhookProvider, event_id: &str) -> AppResult<bool>;

    /// Release a claim so a retry is processed again.
    async fn release(&self, provider: WebhookProvider, event_id: &str) -> AppResult<()>;

    /// Forget deliveries received before `before`.
    async fn purge_older_than(&self, before: DateTime<Utc>) -> AppResult<u64>;
}
