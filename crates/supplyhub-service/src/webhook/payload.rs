//! Provider payload schemas.
//!
//! Bodies are deserialized with serde and then checked with `validator`
//! before any lookup runs, so a malformed delivery never reaches a store.

use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use supplyhub_core::error::AppError;
use supplyhub_entity::warehouse::TemperatureAlert;
use supplyhub_entity::webhook::WebhookProvider;

/// Deserialize and validate a provider body.
pub fn parse<T: DeserializeOwned + Validate>(
    provider: WebhookProvider,
    body: &[u8],
) -> Result<T, AppError> {
    let payload: T = serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid {provider} payload: {e}")))?;
    payload
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid {provider} payload: {e}")))?;
    Ok(payload)
}

/// Largest stock movement accepted for one SKU in a single order.
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;

/// Shopify `orders/create` body. Only the fields this service reads.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShopifyOrder {
    #[serde(deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "order id is required"))]
    pub id: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub order_number: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub total_price: Option<String>,
    #[serde(default)]
    pub customer: Option<ShopifyCustomer>,
    #[validate(length(min = 1, message = "order has no line items"))]
    #[validate(nested)]
    pub line_items: Vec<ShopifyLineItem>,
}

/// One Shopify order line.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShopifyLineItem {
    /// Custom line items carry no SKU.
    #[serde(default)]
    pub sku: Option<String>,
    #[validate(range(
        min = 1,
        max = MAX_LINE_QUANTITY,
        message = "line item quantity must be between 1 and 1000000"
    ))]
    pub quantity: i64,
}

/// Shopify customer block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopifyCustomer {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl ShopifyCustomer {
    /// Full name when known, otherwise the email.
    pub fn display_name(&self) -> Option<String> {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone()
        } else {
            Some(name)
        }
    }
}

impl ShopifyOrder {
    /// Ordered quantity per SKU, in first-seen order. Lines without a SKU
    /// are dropped. A SKU whose total exceeds [`MAX_LINE_QUANTITY`] rejects
    /// the whole order.
    pub fn quantities_by_sku(&self) -> Result<Vec<(String, i64)>, AppError> {
        let mut merged: Vec<(String, i64)> = Vec::new();
        for line in &self.line_items {
            let Some(sku) = line.sku.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
                continue;
            };
            match merged.iter_mut().find(|(existing, _)| existing == sku) {
                Some((_, quantity)) => {
                    *quantity = quantity
                        .checked_add(line.quantity)
                        .filter(|total| *total <= MAX_LINE_QUANTITY)
                        .ok_or_else(|| {
                            AppError::validation(format!(
                                "Ordered quantity for SKU '{sku}' exceeds {MAX_LINE_QUANTITY}"
                            ))
                        })?;
                }
                None => merged.push((sku.to_string(), line.quantity)),
            }
        }
        Ok(merged)
    }
}

/// SAP inventory snapshot body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SapInventoryUpdate {
    #[validate(length(min = 1, message = "sapItemId is required"))]
    pub sap_item_id: String,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i64,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "unitCost must not be negative"))]
    pub unit_cost: f64,
}

/// IoT temperature alert body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IotTemperatureAlert {
    #[validate(length(min = 1, message = "sensorId is required"))]
    pub sensor_id: String,
    pub temperature: f64,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[validate(length(min = 1, message = "warehouseId is required"))]
    pub warehouse_id: String,
    /// Zone name as the device knows it; the sensor binding decides the zone.
    #[serde(default)]
    pub zone_name: Option<String>,
    #[serde(default)]
    pub alert_type: Option<TemperatureAlert>,
    #[serde(default, alias = "timestamp")]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Power BI refresh-complete body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PowerBiRefresh {
    #[validate(length(min = 1, message = "datasetId is required"))]
    pub dataset_id: String,
    #[serde(default)]
    pub dataset_name: Option<String>,
    #[serde(default)]
    pub refresh_type: Option<String>,
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopify_numeric_ids_accepted() {
        let body = br#"{
            "id": 820982911946154500,
            "order_number": 1001,
            "total_price": "199.00",
            "customer": {"first_name": "Ada", "last_name": "Lovelace"},
            "line_items": [{"sku": "W-1", "quantity": 2}, {"sku": null, "quantity": 1}]
        }"#;
        let order: ShopifyOrder = parse(WebhookProvider::Shopify, body).unwrap();
        assert_eq!(order.id, "820982911946154500");
        assert_eq!(order.order_number.as_deref(), Some("1001"));
        assert_eq!(
            order.customer.and_then(|c| c.display_name()).as_deref(),
            Some("Ada Lovelace")
        );
    }

    #[test]
    fn test_quantities_merged_per_sku() {
        let body = br#"{"id": "1", "line_items": [
            {"sku": "A", "quantity": 2}, {"sku": "B", "quantity": 1},
            {"sku": "A", "quantity": 3}, {"quantity": 9}
        ]}"#;
        let order: ShopifyOrder = parse(WebhookProvider::Shopify, body).unwrap();
        assert_eq!(
            order.quantities_by_sku().unwrap(),
            vec![("A".to_string(), 5), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn test_order_without_lines_rejected() {
        let body = br#"{"id": "1", "line_items": []}"#;
        let err = parse::<ShopifyOrder>(WebhookProvider::Shopify, body).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_huge_line_quantity_rejected() {
        let body = br#"{"id": "1", "line_items": [
            {"sku": "A", "quantity": 9223372036854775807}, {"sku": "A", "quantity": 1}
        ]}"#;
        let err = parse::<ShopifyOrder>(WebhookProvider::Shopify, body).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_merged_quantity_over_limit_rejected() {
        let body = br#"{"id": "1", "line_items": [
            {"sku": "A", "quantity": 1000000}, {"sku": "A", "quantity": 1}
        ]}"#;
        let order: ShopifyOrder = parse(WebhookProvider::Shopify, body).unwrap();
        let err = order.quantities_by_sku().unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_zero_quantity_line_rejected() {
        let body = br#"{"id": "1", "line_items": [{"sku": "A", "quantity": 0}]}"#;
        let err = parse::<ShopifyOrder>(WebhookProvider::Shopify, body).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_sap_requires_item_id() {
        let body = br#"{"sapItemId": "", "quantity": 1, "price": 1.0, "unitCost": 0.5}"#;
        let err = parse::<SapInventoryUpdate>(WebhookProvider::Sap, body).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let body = br#"{"quantity": 1, "price": 1.0, "unitCost": 0.5}"#;
        assert!(parse::<SapInventoryUpdate>(WebhookProvider::Sap, body).is_err());
    }

    #[test]
    fn test_iot_alert_type_is_uppercase() {
        let body = br#"{"sensorId": "S-1", "temperature": 9.5, "threshold": 8.0,
            "warehouseId": "w", "zoneName": "Cold", "alertType": "HIGH"}"#;
        let alert: IotTemperatureAlert = parse(WebhookProvider::Iot, body).unwrap();
        assert_eq!(alert.alert_type, Some(TemperatureAlert::High));
        assert!(alert.recorded_at.is_none());
    }

    #[test]
    fn test_malformed_json_is_validation_error() {
        let err = parse::<PowerBiRefresh>(WebhookProvider::PowerBi, b"{not json").unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
