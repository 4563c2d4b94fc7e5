//! Notification retention configuration.

use serde::{Deserialize, Serialize};

/// How long notifications are kept and how often the sweep runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Notifications older than this many days are deleted.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Only the newest N notifications per user are kept.
    #[serde(default = "default_max_per_user")]
    pub max_per_user: u32,
    /// Interval between retention sweeps in seconds (0 disables the sweep).
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            max_per_user: default_max_per_user(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_retention_days() -> u32 {
    90
}

fn default_max_per_user() -> u32 {
    1000
}

fn default_sweep_interval() -> u64 {
    3600
}
