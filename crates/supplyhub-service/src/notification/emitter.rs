//! Notification emitter, the only writer of new notifications.

use std::sync::Arc;

use tracing::{debug, warn};

use supplyhub_core::result::AppResult;
use supplyhub_core::types::UserId;
use supplyhub_database::NotificationStore;
use supplyhub_entity::notification::{NewNotification, Notification, NotificationPayload};

/// Persists new, unread notifications for a single user.
#[derive(Debug, Clone)]
pub struct NotificationEmitter {
    store: Arc<dyn NotificationStore>,
}

impl NotificationEmitter {
    /// Creates a new emitter.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Insert a notification for `user_id`.
    pub async fn emit(
        &self,
        user_id: UserId,
        title: impl Into<String>,
        message: impl Into<String>,
        payload: NotificationPayload,
    ) -> AppResult<Notification> {
        let new = NewNotification {
            user_id,
            title: title.into(),
            message: message.into(),
            payload,
        };
        let notification = self.store.insert(new).await?;
        debug!(
            user_id = %user_id,
            notification_id = %notification.id,
            kind = %notification.kind(),
            "Notification emitted"
        );
        Ok(notification)
    }

    /// Insert a notification, logging instead of returning a failure.
    ///
    /// Webhook handlers use this after their mutation has committed.
    pub async fn emit_best_effort(
        &self,
        user_id: UserId,
        title: impl Into<String>,
        message: impl Into<String>,
        payload: NotificationPayload,
    ) -> Option<Notification> {
        let kind = payload.kind();
        match self.emit(user_id, title, message, payload).await {
            Ok(notification) => Some(notification),
            Err(e) => {
                warn!(user_id = %user_id, kind = %kind, error = %e, "Failed to emit notification");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplyhub_core::types::PageRequest;
    use supplyhub_database::memory::MemoryNotificationStore;
    use supplyhub_entity::notification::{NotificationType, SystemPayload};

    #[tokio::test]
    async fn test_emit_persists_unread() {
        let store = Arc::new(MemoryNotificationStore::default());
        let emitter = NotificationEmitter::new(store.clone());
        let user = UserId::new();

        let created = emitter
            .emit(
                user,
                "Hello",
                "First message",
                NotificationPayload::System(SystemPayload::default()),
            )
            .await
            .unwrap();

        assert!(!created.read);
        assert_eq!(created.kind(), NotificationType::System);
        let page = store.list_for_user(user, &PageRequest::default()).await.unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].id, created.id);
    }
}
