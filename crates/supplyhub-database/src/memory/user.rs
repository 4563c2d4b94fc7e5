//! In-memory user store with integration lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use supplyhub_core::AppError;
use supplyhub_core::result::AppResult;
use supplyhub_core::types::UserId;
use supplyhub_entity::integration::{IntegrationCategory, IntegrationSettings};
use supplyhub_entity::user::User;

use crate::store::{IntegrationQuery, UserStore};

/// In-memory [`UserStore`].
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: User) -> AppResult<User> {
        let mut guard = self.users.write().await;
        if guard.values().any(|u| u.email == user.email) {
            return Err(AppError::conflict(format!("Email '{}' is taken", user.email)));
        }
        guard.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_integration(&self, query: &IntegrationQuery) -> AppResult<Option<User>> {
        let guard = self.users.read().await;
        Ok(guard
            .values()
            .filter(|user| query.matches(user))
            .min_by_key(|user| {
                let enabled = user.integrations.get(query.category).enabled;
                (!enabled, user.created_at)
            })
            .cloned())
    }

    async fn update_integration(
        &self,
        id: UserId,
        category: IntegrationCategory,
        settings: IntegrationSettings,
    ) -> AppResult<Option<User>> {
        let mut guard = self.users.write().await;
        Ok(guard.get_mut(&id).map(|user| {
            user.integrations.set(category, settings);
            user.updated_at = Utc::now();
            user.clone()
        }))
    }
}
