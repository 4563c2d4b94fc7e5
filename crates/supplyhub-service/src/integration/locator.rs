//! Resolves the user that owns an inbound integration event.

use std::sync::Arc;

use tracing::debug;

use supplyhub_core::error::AppError;
use supplyhub_core::result::AppResult;
use supplyhub_database::{IntegrationQuery, UserStore};
use supplyhub_entity::integration::IntegrationState;
use supplyhub_entity::user::User;

/// Finds the user whose integration registration matches a query and
/// checks that the integration may be processed.
#[derive(Debug, Clone)]
pub struct IntegrationLocator {
    users: Arc<dyn UserStore>,
}

impl IntegrationLocator {
    /// Creates a new locator.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Locate the owning user.
    ///
    /// Fails with `NOT_FOUND` when nobody matches, `INTEGRATION_DISABLED`
    /// when the matching slot is switched off, and `MISSING_CREDENTIALS`
    /// when it is on but carries no credentials.
    pub async fn locate(&self, query: &IntegrationQuery) -> AppResult<User> {
        let user = self
            .users
            .find_by_integration(query)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("No user has a {} integration for this event", query.category))
            })?;

        let settings = user.integrations.get(query.category);
        match settings.state() {
            IntegrationState::Ready => {
                debug!(user_id = %user.id, category = %query.category, "Integration located");
                Ok(user)
            }
            IntegrationState::Disabled => Err(AppError::integration_disabled(format!(
                "The {} integration is disabled",
                query.category
            ))),
            IntegrationState::MissingCredentials => Err(AppError::missing_credentials(format!(
                "The {} integration has no credentials configured",
                query.category
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplyhub_database::memory::MemoryUserStore;
    use supplyhub_entity::integration::{
        IntegrationCategory, IntegrationCredentials, IntegrationService, IntegrationSettings,
    };

    fn erp_user(email: &str, enabled: bool, api_key: Option<&str>) -> User {
        let mut user = User::new(email, None);
        user.integrations.set(
            IntegrationCategory::ErpCrm,
            IntegrationSettings {
                enabled,
                service: Some(IntegrationService::Sap),
                credentials: Some(IntegrationCredentials {
                    api_key: api_key.map(str::to_string),
                    store_url: None,
                }),
            },
        );
        user
    }

    async fn locator_with(user: User) -> IntegrationLocator {
        let store = Arc::new(MemoryUserStore::default());
        store.insert(user).await.unwrap();
        IntegrationLocator::new(store)
    }

    #[tokio::test]
    async fn test_ready_integration_resolves_user() {
        let user = erp_user("a@example.com", true, Some("key"));
        let locator = locator_with(user.clone()).await;
        let found = locator
            .locate(&IntegrationQuery::service(IntegrationService::Sap))
            .await
            .unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_disabled_integration_reported() {
        let locator = locator_with(erp_user("a@example.com", false, Some("key"))).await;
        let err = locator
            .locate(&IntegrationQuery::service(IntegrationService::Sap))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INTEGRATION_DISABLED");
    }

    #[tokio::test]
    async fn test_missing_credentials_reported() {
        let locator = locator_with(erp_user("a@example.com", true, None)).await;
        let err = locator
            .locate(&IntegrationQuery::service(IntegrationService::Sap))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "MISSING_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_no_match_is_not_found() {
        let locator = locator_with(erp_user("a@example.com", true, Some("key"))).await;
        let err = locator
            .locate(&IntegrationQuery::service(IntegrationService::Shopify))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
