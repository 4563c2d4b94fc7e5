//! Typed notification payloads.
//!
//! The payload shape is determined by the notification type. Each variant
//! of [`NotificationPayload`] carries its own struct, and the serialized
//! form is `{"type": "...", "payload": {...}}` so consumers never read a
//! field without first matching on the type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use supplyhub_core::AppError;
use supplyhub_core::types::{InventoryItemId, WarehouseId};

use super::kind::NotificationType;
use crate::dataset::RefreshStatus;
use crate::warehouse::TemperatureAlert;

/// Payload of a notification, tagged by its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationPayload {
    /// A storefront order was received.
    OrderUpdate(OrderUpdatePayload),
    /// Stock fell to or below the configured minimum.
    InventoryAlert(InventoryAlertPayload),
    /// Stock was overwritten from an ERP snapshot.
    InventoryUpdate(InventoryUpdatePayload),
    /// A zone received a temperature reading.
    WarehouseUpdate(WarehouseUpdatePayload),
    /// A dataset refresh completed.
    IntegrationSync(DatasetRefreshPayload),
    /// An integration reported a failure.
    IntegrationStatus(IntegrationStatusPayload),
    /// Free-form system message.
    System(SystemPayload),
}

impl NotificationPayload {
    /// The notification type this payload belongs to.
    pub fn kind(&self) -> NotificationType {
        match self {
            Self::OrderUpdate(_) => NotificationType::OrderUpdate,
            Self::InventoryAlert(_) => NotificationType::InventoryAlert,
            Self::InventoryUpdate(_) => NotificationType::InventoryUpdate,
            Self::WarehouseUpdate(_) => NotificationType::WarehouseUpdate,
            Self::IntegrationSync(_) => NotificationType::IntegrationSync,
            Self::IntegrationStatus(_) => NotificationType::IntegrationStatus,
            Self::System(_) => NotificationType::System,
        }
    }

    /// Split into the stored `(kind, payload)` column pair.
    pub fn to_parts(&self) -> Result<(NotificationType, serde_json::Value), AppError> {
        let value = match self {
            Self::OrderUpdate(p) => serde_json::to_value(p)?,
            Self::InventoryAlert(p) => serde_json::to_value(p)?,
            Self::InventoryUpdate(p) => serde_json::to_value(p)?,
            Self::WarehouseUpdate(p) => serde_json::to_value(p)?,
            Self::IntegrationSync(p) => serde_json::to_value(p)?,
            Self::IntegrationStatus(p) => serde_json::to_value(p)?,
            Self::System(p) => serde_json::to_value(p)?,
        };
        Ok((self.kind(), value))
    }

    /// Rebuild from the stored column pair, re-validating the payload
    /// against the shape its kind requires.
    pub fn from_parts(kind: &str, payload: serde_json::Value) -> Result<Self, AppError> {
        let kind: NotificationType = kind.parse().map_err(AppError::internal)?;
        let tagged = serde_json::json!({ "type": kind.as_str(), "payload": payload });
        serde_json::from_value(tagged).map_err(|e| {
            AppError::internal(format!("Stored {kind} payload does not match its type: {e}"))
        })
    }
}

/// One line of a storefront order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLinePayload {
    /// Stock keeping unit.
    pub sku: String,
    /// Units ordered.
    pub quantity: i64,
    /// Whether the SKU matched a tracked inventory item.
    pub matched: bool,
}

/// Payload for [`NotificationType::OrderUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdatePayload {
    /// Provider order id.
    pub order_id: String,
    /// Human-facing order number.
    pub order_number: Option<String>,
    /// Order total as reported by the provider.
    pub total_price: Option<String>,
    /// Customer display name or email.
    pub customer: Option<String>,
    /// Ordered lines.
    pub line_items: Vec<OrderLinePayload>,
}

/// Payload for [`NotificationType::InventoryAlert`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryAlertPayload {
    /// Affected item.
    pub item_id: InventoryItemId,
    /// Item name.
    pub name: String,
    /// Item SKU.
    pub sku: Option<String>,
    /// Quantity after the change.
    pub quantity: i64,
    /// Configured minimum stock.
    pub min_amount: i64,
}

/// Payload for [`NotificationType::InventoryUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryUpdatePayload {
    /// Affected item.
    pub item_id: InventoryItemId,
    /// ERP item id used for the lookup.
    pub sap_item_id: String,
    /// Quantity after the overwrite.
    pub quantity: i64,
    /// New unit price.
    pub price: f64,
    /// New unit cost.
    pub unit_cost: f64,
}

/// Payload for [`NotificationType::WarehouseUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseUpdatePayload {
    /// Warehouse containing the zone.
    pub warehouse_id: WarehouseId,
    /// Zone that received the reading.
    pub zone_name: String,
    /// Reporting sensor.
    pub sensor_id: String,
    /// Reading value.
    pub temperature: f64,
    /// Threshold the sensor compared against.
    pub threshold: Option<f64>,
    /// Direction of the alert, if any.
    pub alert_type: Option<TemperatureAlert>,
    /// When the reading was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Payload for [`NotificationType::IntegrationSync`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRefreshPayload {
    /// BI dataset id.
    pub dataset_id: String,
    /// Dataset display name.
    pub dataset_name: String,
    /// Refresh type reported by the provider.
    pub refresh_type: String,
    /// Outcome.
    pub status: RefreshStatus,
    /// Refresh start.
    pub start_time: DateTime<Utc>,
    /// Refresh end.
    pub end_time: Option<DateTime<Utc>>,
}

/// Payload for [`NotificationType::IntegrationStatus`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationStatusPayload {
    /// Service that reported the status, e.g. `power_bi`.
    pub service: String,
    /// Resource the status refers to.
    pub resource_id: String,
    /// Reported status.
    pub status: String,
    /// Provider error message.
    pub error: Option<String>,
}

/// Payload for [`NotificationType::System`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemPayload {
    /// Originating component.
    #[serde(default)]
    pub source: Option<String>,
    /// Extra detail.
    #[serde(default)]
    pub details: Option<String>,
}
