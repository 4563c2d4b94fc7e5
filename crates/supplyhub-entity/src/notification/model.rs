//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use supplyhub_core::types::{NotificationId, UserId};

use super::kind::NotificationType;
use super::payload::NotificationPayload;

/// A persisted, per-user notification.
///
/// Serializes with the payload flattened, so clients see
/// `{"id", "user_id", "type", "payload", "title", "message", "read", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The owning user.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Human-readable body.
    pub message: String,
    /// Type-tagged payload.
    #[serde(flatten)]
    pub payload: NotificationPayload,
    /// Whether the owner has read it.
    pub read: bool,
    /// When it was first marked read.
    pub read_at: Option<DateTime<Utc>>,
    /// When it was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// The notification type.
    pub fn kind(&self) -> NotificationType {
        self.payload.kind()
    }

    /// Materialize a fresh, unread notification.
    pub fn from_new(new: NewNotification) -> Self {
        Self {
            id: NotificationId::new(),
            user_id: new.user_id,
            title: new.title,
            message: new.message,
            payload: new.payload,
            read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Mark as read, keeping the first read timestamp.
    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        self.read = true;
        self.read_at.get_or_insert(at);
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    /// Recipient.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Human-readable body.
    pub message: String,
    /// Type-tagged payload.
    pub payload: NotificationPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::SystemPayload;

    fn sample() -> Notification {
        Notification::from_new(NewNotification {
            user_id: UserId::new(),
            title: "Maintenance".into(),
            message: "Scheduled downtime".into(),
            payload: NotificationPayload::System(SystemPayload::default()),
        })
    }

    #[test]
    fn test_new_notification_is_unread() {
        let n = sample();
        assert!(!n.read);
        assert!(n.read_at.is_none());
        assert_eq!(n.kind(), NotificationType::System);
    }

    #[test]
    fn test_mark_read_keeps_first_timestamp() {
        let mut n = sample();
        let first = Utc::now();
        n.mark_read(first);
        n.mark_read(first + chrono::Duration::minutes(5));
        assert!(n.read);
        assert_eq!(n.read_at, Some(first));
    }

    #[test]
    fn test_json_shape_flattens_payload() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["type"], "SYSTEM");
        assert_eq!(value["read"], false);
        assert!(value.get("payload").is_some());
        let back: Notification = serde_json::from_value(value).unwrap();
        assert_eq!(back.kind(), NotificationType::System);
    }
}
