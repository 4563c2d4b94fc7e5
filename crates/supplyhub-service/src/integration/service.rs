//! Reading and replacing the caller's integration settings.

use std::sync::Arc;

use tracing::info;

use supplyhub_core::error::AppError;
use supplyhub_core::result::AppResult;
use supplyhub_database::UserStore;
use supplyhub_entity::integration::{IntegrationCategory, IntegrationSettings, Integrations};

use crate::context::RequestContext;

/// Manages integration registrations on the caller's user record.
#[derive(Debug, Clone)]
pub struct IntegrationSettingsService {
    users: Arc<dyn UserStore>,
}

impl IntegrationSettingsService {
    /// Creates a new settings service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// All integration slots of the caller.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Integrations> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .map(|user| user.integrations)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Replace one slot. The service, if set, must belong to `category`.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        category: IntegrationCategory,
        settings: IntegrationSettings,
    ) -> AppResult<Integrations> {
        if let Some(service) = settings.service.filter(|s| s.category() != category) {
            return Err(AppError::validation(format!(
                "Service '{service}' does not belong to category '{category}'"
            )));
        }

        let enabled = settings.enabled;
        let user = self
            .users
            .update_integration(ctx.user_id, category, settings)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %ctx.user_id, category = %category, enabled, "Integration settings updated");
        Ok(user.integrations)
    }
}
