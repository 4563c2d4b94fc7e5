//! Response DTOs.

use serde::{Deserialize, Serialize};

/// `{count}` body for the unread counter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountResponse {
    /// Number of unread notifications.
    pub count: u64,
}

/// `{success: true}` acknowledgement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{marked}` body for mark-all-read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkedResponse {
    /// Notifications flipped to read by this call.
    pub marked: u64,
}

/// Body returned by every webhook receiver on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
}

/// Detailed health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `ok` when every dependency answers, otherwise `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Persistence backend state.
    pub database: ComponentHealth,
    /// Cache provider state.
    pub cache: ComponentHealth,
}

/// State of one dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// `up`, `down`, or `in_memory`.
    pub status: String,
    /// Failure detail when down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentHealth {
    pub fn up() -> Self {
        Self {
            status: "up".to_string(),
            error: None,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            status: "in_memory".to_string(),
            error: None,
        }
    }

    pub fn down(error: impl Into<String>) -> Self {
        Self {
            status: "down".to_string(),
            error: Some(error.into()),
        }
    }

    pub fn is_down(&self) -> bool {
        self.status == "down"
    }
}
