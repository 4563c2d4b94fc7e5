//! In-memory notification store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use supplyhub_core::result::AppResult;
use supplyhub_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use supplyhub_entity::notification::{NewNotification, Notification};

use crate::store::NotificationStore;

/// In-memory [`NotificationStore`].
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    notifications: RwLock<HashMap<NotificationId, Notification>>,
}

fn newest_first(a: &Notification, b: &Notification) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, new: NewNotification) -> AppResult<Notification> {
        let notification = Notification::from_new(new);
        self.notifications
            .write()
            .await
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let guard = self.notifications.read().await;
        let mut owned: Vec<&Notification> =
            guard.values().filter(|n| n.user_id == user_id).collect();
        owned.sort_by(|a, b| newest_first(a, b));
        let total = owned.len() as u64;
        let items = owned
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<u64> {
        let guard = self.notifications.read().await;
        Ok(guard
            .values()
            .filter(|n| n.user_id == user_id && !n.read)
            .count() as u64)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> AppResult<Option<Notification>> {
        let mut guard = self.notifications.write().await;
        Ok(guard
            .get_mut(&id)
            .filter(|n| n.user_id == user_id)
            .map(|n| {
                n.mark_read(Utc::now());
                n.clone()
            }))
    }

    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
        let now = Utc::now();
        let mut guard = self.notifications.write().await;
        let mut marked = 0;
        for n in guard.values_mut().filter(|n| n.user_id == user_id && !n.read) {
            n.mark_read(now);
            marked += 1;
        }
        Ok(marked)
    }

    async fn delete(&self, id: NotificationId, user_id: UserId) -> AppResult<bool> {
        let mut guard = self.notifications.write().await;
        if guard.get(&id).is_some_and(|n| n.user_id == user_id) {
            guard.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn delete_older_than(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let mut guard = self.notifications.write().await;
        let len = guard.len();
        guard.retain(|_, n| n.created_at >= before);
        Ok((len - guard.len()) as u64)
    }

    async fn trim_per_user(&self, keep: u32) -> AppResult<u64> {
        let mut guard = self.notifications.write().await;
        let mut by_user: HashMap<UserId, Vec<&Notification>> = HashMap::new();
        for n in guard.values() {
            by_user.entry(n.user_id).or_default().push(n);
        }
        let mut doomed = Vec::new();
        for mut owned in by_user.into_values() {
            owned.sort_by(|a, b| newest_first(a, b));
            doomed.extend(owned.into_iter().skip(keep as usize).map(|n| n.id));
        }
        for id in &doomed {
            guard.remove(id);
        }
        Ok(doomed.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplyhub_entity::notification::{NotificationPayload, SystemPayload};

    fn new_for(user_id: UserId, title: &str) -> NewNotification {
        NewNotification {
            user_id,
            title: title.into(),
            message: "body".into(),
            payload: NotificationPayload::System(SystemPayload::default()),
        }
    }

    #[tokio::test]
    async fn test_mark_read_is_owner_scoped_and_idempotent() {
        let store = MemoryNotificationStore::default();
        let owner = UserId::new();
        let other = UserId::new();
        let n = store.insert(new_for(owner, "a")).await.unwrap();

        assert!(store.mark_read(n.id, other).await.unwrap().is_none());
        assert_eq!(store.count_unread(owner).await.unwrap(), 1);

        let first = store.mark_read(n.id, owner).await.unwrap().unwrap();
        let second = store.mark_read(n.id, owner).await.unwrap().unwrap();
        assert!(first.read && second.read);
        assert_eq!(first.read_at, second.read_at);
        assert_eq!(store.count_unread(owner).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_owner() {
        let store = MemoryNotificationStore::default();
        let owner = UserId::new();
        let n = store.insert(new_for(owner, "a")).await.unwrap();

        assert!(!store.delete(n.id, UserId::new()).await.unwrap());
        assert!(store.delete(n.id, owner).await.unwrap());
        assert!(!store.delete(n.id, owner).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_is_paged_newest_first() {
        let store = MemoryNotificationStore::default();
        let owner = UserId::new();
        for i in 0..3 {
            store.insert(new_for(owner, &format!("n{i}"))).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        store.insert(new_for(UserId::new(), "foreign")).await.unwrap();

        let page = store
            .list_for_user(owner, &PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total_items, 3);
        assert!(page.has_next);
        assert_eq!(page.items[0].title, "n2");
        assert_eq!(page.items[1].title, "n1");
    }

    #[tokio::test]
    async fn test_trim_keeps_newest_per_user() {
        let store = MemoryNotificationStore::default();
        let owner = UserId::new();
        for i in 0..4 {
            store.insert(new_for(owner, &format!("n{i}"))).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        let removed = store.trim_per_user(2).await.unwrap();
        assert_eq!(removed, 2);
        let page = store
            .list_for_user(owner, &PageRequest::default())
            .await
            .unwrap();
        let titles: Vec<_> = page.items.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["n3", "n2"]);
    }

    #[tokio::test]
    async fn test_mark_all_read_counts_changes() {
        let store = MemoryNotificationStore::default();
        let owner = UserId::new();
        let n = store.insert(new_for(owner, "a")).await.unwrap();
        store.insert(new_for(owner, "b")).await.unwrap();
        store.mark_read(n.id, owner).await.unwrap();

        assert_eq!(store.mark_all_read(owner).await.unwrap(), 1);
        assert_eq!(store.count_unread(owner).await.unwrap(), 0);
    }
}
