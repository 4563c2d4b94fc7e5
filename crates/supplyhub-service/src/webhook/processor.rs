//! Webhook orchestration per provider.

use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use supplyhub_auth::WebhookVerifier;
use supplyhub_core::config::WebhookConfig;
use supplyhub_core::error::AppError;
use supplyhub_core::result::AppResult;
use supplyhub_core::types::{UserId, WarehouseId};
use supplyhub_database::{IntegrationQuery, Stores, WebhookDeliveryStore};
use supplyhub_entity::dataset::{RefreshRecord, RefreshStatus};
use supplyhub_entity::integration::{IntegrationCategory, IntegrationService};
use supplyhub_entity::inventory::{InventoryItem, InventorySnapshot};
use supplyhub_entity::notification::{
    DatasetRefreshPayload, IntegrationStatusPayload, InventoryAlertPayload,
    InventoryUpdatePayload, NotificationPayload, OrderLinePayload, OrderUpdatePayload,
    WarehouseUpdatePayload,
};
use supplyhub_entity::warehouse::TemperatureReading;
use supplyhub_entity::webhook::WebhookProvider;

use super::payload::{self, IotTemperatureAlert, PowerBiRefresh, SapInventoryUpdate, ShopifyOrder};
use super::stage::WebhookStage;
use crate::dataset::DatasetService;
use crate::integration::IntegrationLocator;
use crate::inventory::InventoryService;
use crate::notification::NotificationEmitter;
use crate::warehouse::WarehouseService;

/// A buffered webhook delivery.
///
/// The API layer extracts the relevant headers and hands over the raw body
/// once; verification and parsing read the same bytes.
#[derive(Debug, Clone, Default)]
pub struct WebhookRequest {
    /// Value of the provider's signature header.
    pub signature: Option<String>,
    /// Provider delivery id, when the provider sends one.
    pub event_id: Option<String>,
    /// Shopify shop domain header.
    pub shop_domain: Option<String>,
    /// Raw request body.
    pub body: Bytes,
}

/// Successful end of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookOutcome {
    /// Human-readable summary returned to the provider.
    pub message: String,
    /// The delivery was already processed and nothing was changed.
    pub duplicate: bool,
    /// Notifications persisted during the NOTIFY stage.
    pub notifications: usize,
}

impl WebhookOutcome {
    fn processed(message: impl Into<String>, notifications: usize) -> Self {
        Self {
            message: message.into(),
            duplicate: false,
            notifications,
        }
    }

    fn duplicate() -> Self {
        Self {
            message: "duplicate delivery ignored".to_string(),
            duplicate: true,
            notifications: 0,
        }
    }
}

/// Result of the dedupe gate.
enum Claim {
    /// First delivery. Holds the claimed event id when deduplication is on.
    Fresh(Option<String>),
    Duplicate,
}

/// Runs inbound webhooks through verification, user lookup, mutation, and
/// notification.
#[derive(Debug, Clone)]
pub struct WebhookProcessor {
    verifier: WebhookVerifier,
    locator: IntegrationLocator,
    inventory: InventoryService,
    warehouses: WarehouseService,
    datasets: DatasetService,
    emitter: NotificationEmitter,
    deliveries: Arc<dyn WebhookDeliveryStore>,
    deduplicate: bool,
}

impl WebhookProcessor {
    /// Creates a processor over the given stores.
    pub fn new(stores: &Stores, config: &WebhookConfig) -> Self {
        Self {
            verifier: WebhookVerifier::new(config.secrets.clone()),
            locator: IntegrationLocator::new(Arc::clone(&stores.users)),
            inventory: InventoryService::new(Arc::clone(&stores.inventory)),
            warehouses: WarehouseService::new(Arc::clone(&stores.warehouses)),
            datasets: DatasetService::new(Arc::clone(&stores.datasets)),
            emitter: NotificationEmitter::new(Arc::clone(&stores.notifications)),
            deliveries: Arc::clone(&stores.deliveries),
            deduplicate: config.deduplicate,
        }
    }

    /// Shopify `orders/create`: decrement stock for every known SKU.
    pub async fn shopify_order(&self, request: WebhookRequest) -> AppResult<WebhookOutcome> {
        let provider = WebhookProvider::Shopify;
        self.verify(provider, &request)?;
        let order: ShopifyOrder = self.parse(provider, &request.body)?;
        let quantities = order
            .quantities_by_sku()
            .map_err(|e| self.failed(provider, WebhookStage::Parse, e))?;

        let mut query = IntegrationQuery::service(IntegrationService::Shopify);
        if let Some(domain) = request.shop_domain.as_deref().filter(|d| !d.trim().is_empty()) {
            query = query.with_store_domain(domain.trim());
        }
        let user_id = self.locate(provider, &query).await?;

        let event_id = match self.claim(provider, &request).await? {
            Claim::Fresh(event_id) => event_id,
            Claim::Duplicate => return Ok(WebhookOutcome::duplicate()),
        };

        let mut lines = Vec::new();
        let mut low_stock = Vec::new();
        for (sku, quantity) in quantities {
            let updated = match self.inventory.apply_delta(user_id, &sku, -quantity).await {
                Ok(updated) => updated,
                Err(e) => return Err(self.abort(provider, event_id.as_deref(), e).await),
            };
            match updated {
                Some(item) => {
                    if item.is_low_stock() {
                        low_stock.push(item);
                    }
                    lines.push(OrderLinePayload { sku, quantity, matched: true });
                }
                None => {
                    warn!(provider = %provider, order_id = %order.id, sku = %sku, "Skipping order line for unknown SKU");
                    lines.push(OrderLinePayload { sku, quantity, matched: false });
                }
            }
        }
        self.stage(provider, WebhookStage::Mutate, user_id);

        let matched = lines.iter().filter(|line| line.matched).count();
        let order_label = order.order_number.as_deref().unwrap_or(&order.id).to_string();
        let mut notifications = 0;
        let update = NotificationPayload::OrderUpdate(OrderUpdatePayload {
            order_id: order.id.clone(),
            order_number: order.order_number.clone(),
            total_price: order.total_price.clone(),
            customer: order.customer.as_ref().and_then(|c| c.display_name()),
            line_items: lines,
        });
        notifications += self
            .notify(
                user_id,
                "New order received",
                format!("Order #{order_label} updated stock for {matched} item(s)"),
                update,
            )
            .await;
        for item in &low_stock {
            notifications += self.notify_low_stock(user_id, item).await;
        }
        self.stage(provider, WebhookStage::Done, user_id);

        Ok(WebhookOutcome::processed(
            format!("Order #{order_label} processed"),
            notifications,
        ))
    }

    /// SAP inventory snapshot: overwrite one item's stock figures.
    pub async fn sap_inventory(&self, request: WebhookRequest) -> AppResult<WebhookOutcome> {
        let provider = WebhookProvider::Sap;
        self.verify(provider, &request)?;
        let update: SapInventoryUpdate = self.parse(provider, &request.body)?;
        let user_id = self
            .locate(provider, &IntegrationQuery::service(IntegrationService::Sap))
            .await?;

        let event_id = match self.claim(provider, &request).await? {
            Claim::Fresh(event_id) => event_id,
            Claim::Duplicate => return Ok(WebhookOutcome::duplicate()),
        };

        let snapshot = InventorySnapshot {
            quantity: update.quantity,
            price: update.price,
            unit_cost: update.unit_cost,
        };
        let item = match self
            .inventory
            .apply_snapshot(user_id, &update.sap_item_id, snapshot)
            .await
        {
            Ok(Some(item)) => item,
            Ok(None) => {
                let err = AppError::not_found(format!(
                    "No inventory item with SAP id '{}'",
                    update.sap_item_id
                ));
                return Err(self.abort(provider, event_id.as_deref(), err).await);
            }
            Err(e) => return Err(self.abort(provider, event_id.as_deref(), e).await),
        };
        self.stage(provider, WebhookStage::Mutate, user_id);

        let mut notifications = self
            .notify(
                user_id,
                "Inventory updated",
                format!("{} now has {} in stock", item.name, item.quantity),
                NotificationPayload::InventoryUpdate(InventoryUpdatePayload {
                    item_id: item.id,
                    sap_item_id: update.sap_item_id.clone(),
                    quantity: item.quantity,
                    price: item.price,
                    unit_cost: item.unit_cost,
                }),
            )
            .await;
        if item.is_low_stock() {
            notifications += self.notify_low_stock(user_id, &item).await;
        }
        self.stage(provider, WebhookStage::Done, user_id);

        Ok(WebhookOutcome::processed(
            format!("Inventory item '{}' updated", update.sap_item_id),
            notifications,
        ))
    }

    /// IoT temperature alert: record the reading on the sensor's zone.
    pub async fn iot_temperature(&self, request: WebhookRequest) -> AppResult<WebhookOutcome> {
        let provider = WebhookProvider::Iot;
        self.verify(provider, &request)?;
        let alert: IotTemperatureAlert = self.parse(provider, &request.body)?;
        let warehouse_id = WarehouseId::from_str(&alert.warehouse_id).map_err(|_| {
            self.failed(
                provider,
                WebhookStage::Parse,
                AppError::invalid_id("warehouseId is not a valid identifier"),
            )
        })?;

        let owner = self
            .warehouses
            .find(warehouse_id)
            .await
            .map_err(|e| self.failed(provider, WebhookStage::LocateUser, e))?
            .map(|warehouse| warehouse.user_id)
            .ok_or_else(|| {
                self.failed(
                    provider,
                    WebhookStage::LocateUser,
                    AppError::not_found("Warehouse not found"),
                )
            })?;
        let query = IntegrationQuery::category(IntegrationCategory::Iot).with_owner(owner);
        let user_id = self.locate(provider, &query).await?;

        let event_id = match self.claim(provider, &request).await? {
            Claim::Fresh(event_id) => event_id,
            Claim::Duplicate => return Ok(WebhookOutcome::duplicate()),
        };

        let reading = TemperatureReading {
            temperature: alert.temperature,
            recorded_at: alert.recorded_at.unwrap_or_else(Utc::now),
        };
        let warehouse = match self
            .warehouses
            .record_temperature(user_id, warehouse_id, &alert.sensor_id, reading)
            .await
        {
            Ok(Some(warehouse)) => warehouse,
            Ok(None) => {
                let err = AppError::not_found(format!(
                    "No zone is bound to sensor '{}'",
                    alert.sensor_id
                ));
                return Err(self.abort(provider, event_id.as_deref(), err).await);
            }
            Err(e) => return Err(self.abort(provider, event_id.as_deref(), e).await),
        };
        self.stage(provider, WebhookStage::Mutate, user_id);

        let zone_name = warehouse
            .zone_for_sensor(&alert.sensor_id)
            .map(|zone| zone.name.clone())
            .or_else(|| alert.zone_name.clone())
            .unwrap_or_default();
        let title = match alert.alert_type {
            Some(kind) => format!("Temperature {} in {zone_name}", kind.as_str().to_lowercase()),
            None => format!("Temperature reading in {zone_name}"),
        };
        let message = match alert.threshold {
            Some(threshold) => format!(
                "{}: {zone_name} reads {:.1}°C (threshold {threshold:.1}°C)",
                warehouse.name, reading.temperature
            ),
            None => format!("{}: {zone_name} reads {:.1}°C", warehouse.name, reading.temperature),
        };
        let notifications = self
            .notify(
                user_id,
                title,
                message,
                NotificationPayload::WarehouseUpdate(WarehouseUpdatePayload {
                    warehouse_id,
                    zone_name: zone_name.clone(),
                    sensor_id: alert.sensor_id.clone(),
                    temperature: reading.temperature,
                    threshold: alert.threshold,
                    alert_type: alert.alert_type,
                    recorded_at: reading.recorded_at,
                }),
            )
            .await;
        self.stage(provider, WebhookStage::Done, user_id);

        Ok(WebhookOutcome::processed(
            format!("Temperature recorded for zone '{zone_name}'"),
            notifications,
        ))
    }

    /// Power BI refresh-complete: store the refresh outcome on the dataset.
    pub async fn powerbi_refresh(&self, request: WebhookRequest) -> AppResult<WebhookOutcome> {
        let provider = WebhookProvider::PowerBi;
        self.verify(provider, &request)?;
        let refresh: PowerBiRefresh = self.parse(provider, &request.body)?;
        let user_id = self
            .locate(provider, &IntegrationQuery::service(IntegrationService::PowerBi))
            .await?;

        let event_id = match self.claim(provider, &request).await? {
            Claim::Fresh(event_id) => event_id,
            Claim::Duplicate => return Ok(WebhookOutcome::duplicate()),
        };

        let status = RefreshStatus::from_provider(&refresh.status);
        let record = RefreshRecord {
            refresh_type: refresh
                .refresh_type
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            status,
            start_time: refresh.start_time.unwrap_or_else(Utc::now),
            end_time: refresh.end_time,
            error: refresh.error.clone(),
        };
        let dataset = match self
            .datasets
            .record_refresh(user_id, &refresh.dataset_id, record.clone())
            .await
        {
            Ok(Some(dataset)) => dataset,
            Ok(None) => {
                let err = AppError::not_found(format!(
                    "Dataset '{}' is not registered",
                    refresh.dataset_id
                ));
                return Err(self.abort(provider, event_id.as_deref(), err).await);
            }
            Err(e) => return Err(self.abort(provider, event_id.as_deref(), e).await),
        };
        self.stage(provider, WebhookStage::Mutate, user_id);

        let dataset_name = refresh.dataset_name.clone().unwrap_or(dataset.name);
        let notifications = if status.is_success() {
            self.notify(
                user_id,
                "Dataset refreshed",
                format!("{dataset_name} finished a {} refresh", record.refresh_type),
                NotificationPayload::IntegrationSync(DatasetRefreshPayload {
                    dataset_id: refresh.dataset_id.clone(),
                    dataset_name: dataset_name.clone(),
                    refresh_type: record.refresh_type.clone(),
                    status,
                    start_time: record.start_time,
                    end_time: record.end_time,
                }),
            )
            .await
        } else {
            self.notify(
                user_id,
                "Dataset refresh failed",
                format!(
                    "{dataset_name} refresh ended with status '{}'",
                    refresh.status
                ),
                NotificationPayload::IntegrationStatus(IntegrationStatusPayload {
                    service: IntegrationService::PowerBi.as_str().to_string(),
                    resource_id: refresh.dataset_id.clone(),
                    status: status.as_str().to_string(),
                    error: refresh.error.clone(),
                }),
            )
            .await
        };
        self.stage(provider, WebhookStage::Done, user_id);

        Ok(WebhookOutcome::processed(
            format!("Refresh recorded for dataset '{}'", refresh.dataset_id),
            notifications,
        ))
    }

    fn verify(&self, provider: WebhookProvider, request: &WebhookRequest) -> AppResult<()> {
        if self
            .verifier
            .verify(provider, request.signature.as_deref(), &request.body)
        {
            Ok(())
        } else {
            Err(self.failed(
                provider,
                WebhookStage::Verify,
                AppError::unauthorized("Invalid webhook signature"),
            ))
        }
    }

    fn parse<T>(&self, provider: WebhookProvider, body: &[u8]) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned + validator::Validate,
    {
        payload::parse(provider, body).map_err(|e| self.failed(provider, WebhookStage::Parse, e))
    }

    async fn locate(&self, provider: WebhookProvider, query: &IntegrationQuery) -> AppResult<UserId> {
        self.locator
            .locate(query)
            .await
            .map(|user| user.id)
            .map_err(|e| self.failed(provider, WebhookStage::LocateUser, e))
    }

    async fn claim(&self, provider: WebhookProvider, request: &WebhookRequest) -> AppResult<Claim> {
        if !self.deduplicate {
            return Ok(Claim::Fresh(None));
        }
        let Some(event_id) = delivery_id(request) else {
            debug!(provider = %provider, "No delivery id sent, skipping deduplication");
            return Ok(Claim::Fresh(None));
        };
        let fresh = self
            .deliveries
            .claim(provider, &event_id)
            .await
            .map_err(|e| self.failed(provider, WebhookStage::Dedupe, e))?;
        if fresh {
            Ok(Claim::Fresh(Some(event_id)))
        } else {
            info!(provider = %provider, event_id = %event_id, "Duplicate webhook delivery ignored");
            Ok(Claim::Duplicate)
        }
    }

    /// Log a mutate-stage failure and give up the delivery claim so the
    /// provider's retry is processed.
    async fn abort(
        &self,
        provider: WebhookProvider,
        event_id: Option<&str>,
        err: AppError,
    ) -> AppError {
        if let Some(event_id) = event_id {
            if let Err(e) = self.deliveries.release(provider, event_id).await {
                error!(provider = %provider, event_id, error = %e, "Failed to release webhook claim");
            }
        }
        self.failed(provider, WebhookStage::Mutate, err)
    }

    async fn notify(
        &self,
        user_id: UserId,
        title: impl Into<String>,
        message: impl Into<String>,
        payload: NotificationPayload,
    ) -> usize {
        usize::from(
            self.emitter
                .emit_best_effort(user_id, title, message, payload)
                .await
                .is_some(),
        )
    }

    async fn notify_low_stock(&self, user_id: UserId, item: &InventoryItem) -> usize {
        self.notify(
            user_id,
            "Low stock alert",
            format!(
                "{} is low on stock ({} left, minimum {})",
                item.name, item.quantity, item.min_amount
            ),
            NotificationPayload::InventoryAlert(InventoryAlertPayload {
                item_id: item.id,
                name: item.name.clone(),
                sku: item.sku.clone(),
                quantity: item.quantity,
                min_amount: item.min_amount,
            }),
        )
        .await
    }

    fn stage(&self, provider: WebhookProvider, stage: WebhookStage, user_id: UserId) {
        debug!(provider = %provider, stage = %stage, user_id = %user_id, "Webhook stage complete");
    }

    fn failed(&self, provider: WebhookProvider, stage: WebhookStage, err: AppError) -> AppError {
        if err.kind.is_server_error() {
            error!(provider = %provider, stage = %stage, error = %err, "Webhook failed");
        } else {
            warn!(provider = %provider, stage = %stage, code = err.code(), message = %err.message, "Webhook rejected");
        }
        err
    }
}

/// Provider event id. Identical bodies are legitimate repeats, so the body
/// is never used as a key.
fn delivery_id(request: &WebhookRequest) -> Option<String> {
    request
        .event_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use supplyhub_core::config::WebhookSecrets;
    use supplyhub_core::types::{InventoryItemId, NotificationId, PageRequest, PageResponse};
    use supplyhub_database::NotificationStore;
    use supplyhub_entity::dataset::Dataset;
    use supplyhub_entity::integration::{IntegrationCredentials, IntegrationSettings};
    use supplyhub_entity::notification::{NewNotification, Notification, NotificationType};
    use supplyhub_entity::user::User;
    use supplyhub_entity::warehouse::{Warehouse, Zone};

    const SECRET: &str = "shared-secret";

    struct Fixture {
        stores: Stores,
        processor: WebhookProcessor,
        verifier: WebhookVerifier,
        user: User,
    }

    fn config(deduplicate: bool) -> WebhookConfig {
        WebhookConfig {
            secrets: WebhookSecrets {
                shopify: SECRET.into(),
                sap: SECRET.into(),
                power_bi: SECRET.into(),
                iot: SECRET.into(),
            },
            deduplicate,
            dedup_retention_hours: 72,
        }
    }

    fn slot(service: IntegrationService, enabled: bool) -> IntegrationSettings {
        IntegrationSettings {
            enabled,
            service: Some(service),
            credentials: Some(IntegrationCredentials {
                api_key: Some("key".into()),
                store_url: Some("acme.myshopify.com".into()),
            }),
        }
    }

    async fn fixture(deduplicate: bool) -> Fixture {
        fixture_over(Stores::memory(), deduplicate).await
    }

    async fn fixture_over(stores: Stores, deduplicate: bool) -> Fixture {
        let mut user = User::new("ops@example.com", None);
        for service in [
            IntegrationService::Shopify,
            IntegrationService::Sap,
            IntegrationService::AwsIot,
            IntegrationService::PowerBi,
        ] {
            user.integrations.set(service.category(), slot(service, true));
        }
        let user = stores.users.insert(user).await.unwrap();
        let config = config(deduplicate);
        Fixture {
            processor: WebhookProcessor::new(&stores, &config),
            verifier: WebhookVerifier::new(config.secrets),
            stores,
            user,
        }
    }

    impl Fixture {
        fn signed(&self, provider: WebhookProvider, body: &str) -> WebhookRequest {
            WebhookRequest {
                signature: self.verifier.sign(provider, body.as_bytes()),
                body: Bytes::from(body.to_string()),
                ..Default::default()
            }
        }

        async fn add_item(&self, sku: &str, sap_id: &str, quantity: i64, min_amount: i64) -> InventoryItem {
            self.stores
                .inventory
                .insert(InventoryItem {
                    id: InventoryItemId::new(),
                    user_id: self.user.id,
                    name: format!("Item {sku}"),
                    sku: Some(sku.into()),
                    sap_item_id: Some(sap_id.into()),
                    quantity,
                    min_amount,
                    price: 10.0,
                    unit_cost: 4.0,
                    updated_at: Utc::now(),
                })
                .await
                .unwrap()
        }

        async fn kinds(&self) -> Vec<NotificationType> {
            let page = self
                .stores
                .notifications
                .list_for_user(self.user.id, &PageRequest::new(1, 100))
                .await
                .unwrap();
            page.items.iter().map(|n| n.kind()).collect()
        }
    }

    const ORDER: &str = r#"{"id": 5001, "order_number": 1001, "total_price": "60.00",
        "line_items": [{"sku": "W-1", "quantity": 6}, {"sku": "GHOST", "quantity": 1}]}"#;

    #[tokio::test]
    async fn test_order_decrements_and_alerts_low_stock() {
        let fx = fixture(true).await;
        let item = fx.add_item("W-1", "SAP-1", 10, 5).await;

        let outcome = fx
            .processor
            .shopify_order(fx.signed(WebhookProvider::Shopify, ORDER))
            .await
            .unwrap();
        assert!(!outcome.duplicate);
        assert_eq!(outcome.notifications, 2);

        let stored = fx.stores.inventory.find_by_id(fx.user.id, item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 4);

        let kinds = fx.kinds().await;
        assert_eq!(
            kinds.iter().filter(|k| **k == NotificationType::InventoryAlert).count(),
            1
        );
        assert_eq!(
            kinds.iter().filter(|k| **k == NotificationType::OrderUpdate).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_redelivered_order_applies_once() {
        let fx = fixture(true).await;
        let item = fx.add_item("W-1", "SAP-1", 10, 5).await;
        let mut request = fx.signed(WebhookProvider::Shopify, ORDER);
        request.event_id = Some("delivery-1".into());

        fx.processor.shopify_order(request.clone()).await.unwrap();
        let second = fx.processor.shopify_order(request).await.unwrap();
        assert!(second.duplicate);

        let stored = fx.stores.inventory.find_by_id(fx.user.id, item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 4);
        assert_eq!(fx.kinds().await.len(), 2);
    }

    #[tokio::test]
    async fn test_redelivery_applies_twice_without_dedupe() {
        let fx = fixture(false).await;
        let item = fx.add_item("W-1", "SAP-1", 10, 5).await;
        let request = fx.signed(WebhookProvider::Shopify, ORDER);

        fx.processor.shopify_order(request.clone()).await.unwrap();
        fx.processor.shopify_order(request).await.unwrap();

        let stored = fx.stores.inventory.find_by_id(fx.user.id, item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, -2);
    }

    /// Notification store whose writes always fail.
    #[derive(Debug)]
    struct BrokenNotificationStore;

    #[async_trait::async_trait]
    impl NotificationStore for BrokenNotificationStore {
        async fn insert(&self, _new: NewNotification) -> AppResult<Notification> {
            Err(AppError::database("notifications table unavailable"))
        }

        async fn list_for_user(
            &self,
            _user_id: UserId,
            _page: &PageRequest,
        ) -> AppResult<PageResponse<Notification>> {
            Err(AppError::database("notifications table unavailable"))
        }

        async fn count_unread(&self, _user_id: UserId) -> AppResult<u64> {
            Err(AppError::database("notifications table unavailable"))
        }

        async fn mark_read(
            &self,
            _id: NotificationId,
            _user_id: UserId,
        ) -> AppResult<Option<Notification>> {
            Err(AppError::database("notifications table unavailable"))
        }

        async fn mark_all_read(&self, _user_id: UserId) -> AppResult<u64> {
            Err(AppError::database("notifications table unavailable"))
        }

        async fn delete(&self, _id: NotificationId, _user_id: UserId) -> AppResult<bool> {
            Err(AppError::database("notifications table unavailable"))
        }

        async fn delete_older_than(&self, _before: DateTime<Utc>) -> AppResult<u64> {
            Err(AppError::database("notifications table unavailable"))
        }

        async fn trim_per_user(&self, _keep: u32) -> AppResult<u64> {
            Err(AppError::database("notifications table unavailable"))
        }
    }

    #[tokio::test]
    async fn test_notification_failure_keeps_order_result_and_mutation() {
        let stores = Stores {
            notifications: Arc::new(BrokenNotificationStore),
            ..Stores::memory()
        };
        let fx = fixture_over(stores, true).await;
        let item = fx.add_item("W-1", "SAP-1", 10, 5).await;

        let outcome = fx
            .processor
            .shopify_order(fx.signed(WebhookProvider::Shopify, ORDER))
            .await
            .unwrap();
        assert!(!outcome.duplicate);
        assert_eq!(outcome.notifications, 0);
        assert_eq!(outcome.message, "Order #1001 processed");

        let stored = fx.stores.inventory.find_by_id(fx.user.id, item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 4);
    }

    #[tokio::test]
    async fn test_overflowing_order_quantities_rejected_before_mutation() {
        let fx = fixture(true).await;
        let item = fx.add_item("A", "SAP-1", 10, 5).await;
        let body = r#"{"id": "7", "line_items": [
            {"sku": "A", "quantity": 1000000}, {"sku": "A", "quantity": 1000000}
        ]}"#;

        let err = fx
            .processor
            .shopify_order(fx.signed(WebhookProvider::Shopify, body))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        let stored = fx.stores.inventory.find_by_id(fx.user.id, item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 10);
    }

    #[tokio::test]
    async fn test_bad_signature_stops_before_mutation() {
        let fx = fixture(true).await;
        let item = fx.add_item("W-1", "SAP-1", 10, 5).await;
        let mut request = fx.signed(WebhookProvider::Shopify, ORDER);
        request.body = Bytes::from(ORDER.replace("5001", "5002"));

        let err = fx.processor.shopify_order(request).await.unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");
        let stored = fx.stores.inventory.find_by_id(fx.user.id, item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 10);
        assert!(fx.kinds().await.is_empty());
    }

    #[tokio::test]
    async fn test_shop_domain_narrows_lookup() {
        let fx = fixture(true).await;
        fx.add_item("W-1", "SAP-1", 10, 5).await;
        let mut request = fx.signed(WebhookProvider::Shopify, ORDER);
        request.shop_domain = Some("other.myshopify.com".into());

        let err = fx.processor.shopify_order(request).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_disabled_integration_rejected() {
        let fx = fixture(true).await;
        fx.stores
            .users
            .update_integration(
                fx.user.id,
                IntegrationCategory::ErpCrm,
                slot(IntegrationService::Sap, false),
            )
            .await
            .unwrap();
        fx.add_item("W-1", "SAP-1", 10, 5).await;
        let body = r#"{"sapItemId": "SAP-1", "quantity": 3, "price": 12.5, "unitCost": 5.0}"#;

        let err = fx
            .processor
            .sap_inventory(fx.signed(WebhookProvider::Sap, body))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INTEGRATION_DISABLED");
    }

    #[tokio::test]
    async fn test_sap_snapshot_overwrites_and_alerts() {
        let fx = fixture(true).await;
        let item = fx.add_item("W-1", "SAP-1", 10, 5).await;
        let body = r#"{"sapItemId": "SAP-1", "quantity": 3, "price": 12.5, "unitCost": 5.0}"#;

        let outcome = fx
            .processor
            .sap_inventory(fx.signed(WebhookProvider::Sap, body))
            .await
            .unwrap();
        assert_eq!(outcome.notifications, 2);

        let stored = fx.stores.inventory.find_by_id(fx.user.id, item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 3);
        assert_eq!(stored.price, 12.5);
        let kinds = fx.kinds().await;
        assert!(kinds.contains(&NotificationType::InventoryUpdate));
        assert!(kinds.contains(&NotificationType::InventoryAlert));
    }

    #[tokio::test]
    async fn test_sap_unknown_item_releases_claim() {
        let fx = fixture(true).await;
        let body = r#"{"sapItemId": "SAP-404", "quantity": 3, "price": 1.0, "unitCost": 1.0}"#;
        let mut request = fx.signed(WebhookProvider::Sap, body);
        request.event_id = Some("sap-evt-1".into());

        let err = fx.processor.sap_inventory(request.clone()).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");

        fx.add_item("W-9", "SAP-404", 10, 1).await;
        let outcome = fx.processor.sap_inventory(request).await.unwrap();
        assert!(!outcome.duplicate);
    }

    async fn add_warehouse(fx: &Fixture) -> Warehouse {
        fx.stores
            .warehouses
            .insert(Warehouse {
                id: WarehouseId::new(),
                user_id: fx.user.id,
                name: "Central".into(),
                zones: vec![Zone {
                    name: "Cold Room".into(),
                    sensor_id: Some("S-1".into()),
                    current_temperature: Some(3.0),
                    last_reading: None,
                }],
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_iot_reading_updates_zone() {
        let fx = fixture(true).await;
        let warehouse = add_warehouse(&fx).await;
        let body = format!(
            r#"{{"sensorId": "S-1", "temperature": 9.5, "threshold": 8.0,
                "warehouseId": "{}", "zoneName": "Cold Room", "alertType": "HIGH"}}"#,
            warehouse.id
        );

        fx.processor
            .iot_temperature(fx.signed(WebhookProvider::Iot, &body))
            .await
            .unwrap();

        let stored = fx.stores.warehouses.find_by_id(warehouse.id).await.unwrap().unwrap();
        assert_eq!(stored.zones[0].current_temperature, Some(9.5));
        assert_eq!(fx.kinds().await, vec![NotificationType::WarehouseUpdate]);
    }

    #[tokio::test]
    async fn test_identical_iot_alerts_without_message_id_both_apply() {
        let fx = fixture(true).await;
        let warehouse = add_warehouse(&fx).await;
        let body = format!(
            r#"{{"sensorId": "S-1", "temperature": 9.5, "threshold": 8.0,
                "warehouseId": "{}", "alertType": "HIGH"}}"#,
            warehouse.id
        );

        for _ in 0..2 {
            let outcome = fx
                .processor
                .iot_temperature(fx.signed(WebhookProvider::Iot, &body))
                .await
                .unwrap();
            assert!(!outcome.duplicate);
            assert_eq!(outcome.notifications, 1);
        }
        assert_eq!(fx.kinds().await.len(), 2);
    }

    #[tokio::test]
    async fn test_iot_alert_with_repeated_message_id_applies_once() {
        let fx = fixture(true).await;
        let warehouse = add_warehouse(&fx).await;
        let body = format!(
            r#"{{"sensorId": "S-1", "temperature": 9.5, "warehouseId": "{}"}}"#,
            warehouse.id
        );
        let mut request = fx.signed(WebhookProvider::Iot, &body);
        request.event_id = Some("msg-1".into());

        fx.processor.iot_temperature(request.clone()).await.unwrap();
        let second = fx.processor.iot_temperature(request).await.unwrap();
        assert!(second.duplicate);
        assert_eq!(fx.kinds().await.len(), 1);
    }

    #[tokio::test]
    async fn test_iot_unknown_sensor_is_not_found_and_unmodified() {
        let fx = fixture(true).await;
        let warehouse = add_warehouse(&fx).await;
        let body = format!(
            r#"{{"sensorId": "S-404", "temperature": 9.5, "warehouseId": "{}"}}"#,
            warehouse.id
        );

        let err = fx
            .processor
            .iot_temperature(fx.signed(WebhookProvider::Iot, &body))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        let stored = fx.stores.warehouses.find_by_id(warehouse.id).await.unwrap().unwrap();
        assert_eq!(stored, warehouse);
        assert!(fx.kinds().await.is_empty());
    }

    #[tokio::test]
    async fn test_iot_malformed_warehouse_id() {
        let fx = fixture(true).await;
        let body = r#"{"sensorId": "S-1", "temperature": 1.0, "warehouseId": "not-a-uuid"}"#;
        let err = fx
            .processor
            .iot_temperature(fx.signed(WebhookProvider::Iot, body))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_ID");
    }

    async fn add_dataset(fx: &Fixture) {
        fx.stores
            .datasets
            .insert(Dataset {
                user_id: fx.user.id,
                dataset_id: "ds-1".into(),
                name: "Sales".into(),
                last_refresh: None,
                updated_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_powerbi_success_and_failure_notifications() {
        let fx = fixture(true).await;
        add_dataset(&fx).await;
        let ok = r#"{"datasetId": "ds-1", "datasetName": "Sales", "refreshType": "Scheduled",
            "status": "Completed", "startTime": "2026-01-01T00:00:00Z", "endTime": "2026-01-01T00:05:00Z"}"#;
        let failed = r#"{"datasetId": "ds-1", "status": "Failed",
            "startTime": "2026-01-02T00:00:00Z", "error": "Gateway offline"}"#;

        fx.processor
            .powerbi_refresh(fx.signed(WebhookProvider::PowerBi, ok))
            .await
            .unwrap();
        fx.processor
            .powerbi_refresh(fx.signed(WebhookProvider::PowerBi, failed))
            .await
            .unwrap();

        let kinds = fx.kinds().await;
        assert!(kinds.contains(&NotificationType::IntegrationSync));
        assert!(kinds.contains(&NotificationType::IntegrationStatus));
        let dataset = fx.stores.datasets.find(fx.user.id, "ds-1").await.unwrap().unwrap();
        let last = dataset.last_refresh.unwrap();
        assert_eq!(last.status, RefreshStatus::Failed);
        assert_eq!(last.error.as_deref(), Some("Gateway offline"));
    }

    #[tokio::test]
    async fn test_powerbi_unknown_dataset_is_not_found() {
        let fx = fixture(true).await;
        let body = r#"{"datasetId": "ds-404", "status": "Completed"}"#;
        let err = fx
            .processor
            .powerbi_refresh(fx.signed(WebhookProvider::PowerBi, body))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_delivery_id_is_the_provider_event_id() {
        let request = WebhookRequest {
            body: Bytes::from_static(b"{}"),
            ..Default::default()
        };
        assert_eq!(delivery_id(&request), None);

        let request = WebhookRequest {
            event_id: Some("   ".into()),
            ..request
        };
        assert_eq!(delivery_id(&request), None);

        let request = WebhookRequest {
            event_id: Some(" evt-1 ".into()),
            ..request
        };
        assert_eq!(delivery_id(&request).as_deref(), Some("evt-1"));
    }
}
