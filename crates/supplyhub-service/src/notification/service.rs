//! Owner-scoped notification queries and mutations.

use std::sync::Arc;

use tracing::info;

use supplyhub_core::error::AppError;
use supplyhub_core::result::AppResult;
use supplyhub_core::types::{NotificationId, PageRequest, PageResponse};
use supplyhub_database::NotificationStore;
use supplyhub_entity::notification::{Notification, NotificationPayload};

use crate::context::RequestContext;
use crate::notification::emitter::NotificationEmitter;

/// Manages the caller's notifications.
///
/// A notification that belongs to someone else is reported exactly like one
/// that does not exist.
#[derive(Debug, Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
    emitter: NotificationEmitter,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        let emitter = NotificationEmitter::new(Arc::clone(&store));
        Self { store, emitter }
    }

    /// Lists notifications for the current user, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.store.list_for_user(ctx.user_id, &page).await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.store.count_unread(ctx.user_id).await
    }

    /// Marks a notification as read. Repeating the call is a no-op.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
    ) -> AppResult<Notification> {
        self.store
            .mark_read(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Marks all notifications as read for the current user.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        let marked = self.store.mark_all_read(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, marked, "Marked all notifications read");
        Ok(marked)
    }

    /// Deletes one of the caller's notifications.
    pub async fn delete(&self, ctx: &RequestContext, id: NotificationId) -> AppResult<()> {
        if self.store.delete(id, ctx.user_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Notification not found"))
        }
    }

    /// Creates a notification addressed to the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        title: String,
        message: String,
        payload: NotificationPayload,
    ) -> AppResult<Notification> {
        self.emitter.emit(ctx.user_id, title, message, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplyhub_core::types::UserId;
    use supplyhub_database::memory::MemoryNotificationStore;
    use supplyhub_entity::notification::SystemPayload;

    fn service() -> NotificationService {
        NotificationService::new(Arc::new(MemoryNotificationStore::default()))
    }

    async fn create(svc: &NotificationService, ctx: &RequestContext, title: &str) -> Notification {
        svc.create(
            ctx,
            title.to_string(),
            "body".to_string(),
            NotificationPayload::System(SystemPayload::default()),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_unread_count_follows_mark_read() {
        let svc = service();
        let ctx = RequestContext::for_user(UserId::new());
        let first = create(&svc, &ctx, "one").await;
        create(&svc, &ctx, "two").await;
        assert_eq!(svc.unread_count(&ctx).await.unwrap(), 2);

        let read = svc.mark_read(&ctx, first.id).await.unwrap();
        assert!(read.read);
        assert_eq!(svc.unread_count(&ctx).await.unwrap(), 1);

        let again = svc.mark_read(&ctx, first.id).await.unwrap();
        assert_eq!(again.read_at, read.read_at);
        assert_eq!(svc.unread_count(&ctx).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_foreign_notification_is_not_found() {
        let svc = service();
        let owner = RequestContext::for_user(UserId::new());
        let intruder = RequestContext::for_user(UserId::new());
        let note = create(&svc, &owner, "private").await;

        let err = svc.mark_read(&intruder, note.id).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        let err = svc.delete(&intruder, note.id).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");

        assert_eq!(svc.unread_count(&owner).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing() {
        let svc = service();
        let ctx = RequestContext::for_user(UserId::new());
        let note = create(&svc, &ctx, "gone").await;

        svc.delete(&ctx, note.id).await.unwrap();
        let page = svc.list(&ctx, PageRequest::default()).await.unwrap();
        assert!(page.items.is_empty());

        let err = svc.delete(&ctx, note.id).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_mark_all_read_only_touches_caller() {
        let svc = service();
        let alice = RequestContext::for_user(UserId::new());
        let bob = RequestContext::for_user(UserId::new());
        create(&svc, &alice, "a1").await;
        create(&svc, &alice, "a2").await;
        create(&svc, &bob, "b1").await;

        assert_eq!(svc.mark_all_read(&alice).await.unwrap(), 2);
        assert_eq!(svc.unread_count(&alice).await.unwrap(), 0);
        assert_eq!(svc.unread_count(&bob).await.unwrap(), 1);
    }
}
