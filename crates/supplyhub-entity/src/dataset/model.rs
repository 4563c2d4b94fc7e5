//! BI dataset entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use supplyhub_core::types::UserId;

/// A BI dataset registered by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Owning user.
    pub user_id: UserId,
    /// Provider dataset id.
    pub dataset_id: String,
    /// Display name.
    pub name: String,
    /// Outcome of the most recent refresh.
    pub last_refresh: Option<RefreshRecord>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Outcome of one dataset refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshRecord {
    /// Provider refresh type, e.g. `Scheduled` or `OnDemand`.
    pub refresh_type: String,
    pub status: RefreshStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Provider error message on failure.
    pub error: Option<String>,
}

/// Normalized refresh status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStatus {
    Completed,
    Failed,
    Cancelled,
    Unknown,
}

impl RefreshStatus {
    /// Map a provider status string, case-insensitively.
    pub fn from_provider(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "completed" | "succeeded" | "success" => Self::Completed,
            "failed" | "error" => Self::Failed,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    /// Whether the refresh succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}
