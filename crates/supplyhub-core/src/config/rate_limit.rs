//! Rate limiting configuration.

use serde::{Deserialize, Serialize};

/// Fixed-window request limits keyed by route name and caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether rate limiting is applied at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Requests allowed per caller per window on the notification API.
    #[serde(default = "default_api_requests")]
    pub api_requests_per_window: u32,
    /// Requests allowed per caller per window on webhook endpoints.
    #[serde(default = "default_webhook_requests")]
    pub webhook_requests_per_window: u32,
    /// Window length in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_requests_per_window: default_api_requests(),
            webhook_requests_per_window: default_webhook_requests(),
            window_seconds: default_window(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_api_requests() -> u32 {
    120
}

fn default_webhook_requests() -> u32 {
    600
}

fn default_window() -> u64 {
    60
}
