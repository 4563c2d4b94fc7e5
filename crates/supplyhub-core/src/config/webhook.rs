//! Inbound webhook configuration.

use serde::{Deserialize, Serialize};

/// Webhook verification and delivery handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Shared secrets, one per provider.
    #[serde(default)]
    pub secrets: WebhookSecrets,
    /// Skip side effects for deliveries whose event id was already processed.
    #[serde(default = "default_true")]
    pub deduplicate: bool,
    /// How long a processed delivery id is remembered, in hours.
    #[serde(default = "default_dedup_retention")]
    pub dedup_retention_hours: u32,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secrets: WebhookSecrets::default(),
            deduplicate: true,
            dedup_retention_hours: default_dedup_retention(),
        }
    }
}

/// Per-provider signing secrets. An empty secret rejects every delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookSecrets {
    /// Shopify app shared secret.
    #[serde(default)]
    pub shopify: String,
    /// SAP event mesh signing key.
    #[serde(default)]
    pub sap: String,
    /// Power BI notification secret.
    #[serde(default)]
    pub power_bi: String,
    /// IoT platform signing key.
    #[serde(default)]
    pub iot: String,
}

fn default_true() -> bool {
    true
}

fn default_dedup_retention() -> u32 {
    72
}
