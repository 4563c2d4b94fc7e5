//! Webhook providers and processed-delivery records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A third-party system that sends webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookProvider {
    Shopify,
    Sap,
    PowerBi,
    Iot,
}

impl WebhookProvider {
    /// Return the provider as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shopify => "shopify",
            Self::Sap => "sap",
            Self::PowerBi => "power_bi",
            Self::Iot => "iot",
        }
    }
}

impl fmt::Display for WebhookProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery that was claimed for processing.
///
/// `(provider, event_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookDelivery {
    pub provider: WebhookProvider,
    pub event_id: String,
    pub received_at: DateTime<Utc>,
}
