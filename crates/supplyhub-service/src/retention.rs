//! Periodic notification retention and delivery-record cleanup.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use supplyhub_core::config::{NotificationConfig, WebhookConfig};
use supplyhub_core::result::AppResult;
use supplyhub_database::{NotificationStore, WebhookDeliveryStore};

/// Counts from one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionReport {
    pub expired: u64,
    pub overflow: u64,
    pub deliveries: u64,
}

/// Deletes expired notifications, caps each user's notification count, and
/// forgets old webhook delivery ids.
#[derive(Debug, Clone)]
pub struct RetentionTask {
    notifications: Arc<dyn NotificationStore>,
    deliveries: Arc<dyn WebhookDeliveryStore>,
    retention_days: u32,
    max_per_user: u32,
    dedup_retention_hours: u32,
    interval: Duration,
}

impl RetentionTask {
    /// Creates a retention task.
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        deliveries: Arc<dyn WebhookDeliveryStore>,
        config: &NotificationConfig,
        webhooks: &WebhookConfig,
    ) -> Self {
        Self {
            notifications,
            deliveries,
            retention_days: config.retention_days,
            max_per_user: config.max_per_user,
            dedup_retention_hours: webhooks.dedup_retention_hours,
            interval: Duration::from_secs(config.sweep_interval_seconds),
        }
    }

    /// Run one sweep.
    pub async fn sweep(&self) -> AppResult<RetentionReport> {
        let cutoff = Utc::now() - chrono::Duration::days(i64::from(self.retention_days));
        let expired = self.notifications.delete_older_than(cutoff).await?;
        let overflow = self.notifications.trim_per_user(self.max_per_user).await?;

        let delivery_cutoff =
            Utc::now() - chrono::Duration::hours(i64::from(self.dedup_retention_hours));
        let deliveries = self.deliveries.purge_older_than(delivery_cutoff).await?;

        info!(
            "Notification cleanup: removed {} expired, {} overflow, {} delivery records",
            expired, overflow, deliveries
        );
        Ok(RetentionReport {
            expired,
            overflow,
            deliveries,
        })
    }

    /// Sweep on every interval tick until `cancel` flips to `true`.
    ///
    /// Returns immediately when the interval is zero.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        if self.interval.is_zero() {
            info!("Notification retention sweep disabled");
            return;
        }
        info!(interval_seconds = self.interval.as_secs(), "Notification retention sweep started");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        info!("Notification retention sweep received shutdown signal");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep().await {
                        error!(error = %e, "Notification retention sweep failed");
                    }
                }
            }
        }
    }
}
