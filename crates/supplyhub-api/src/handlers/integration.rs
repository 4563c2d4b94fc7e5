//! Integration settings of the authenticated user.

use axum::Json;
use axum::extract::{Path, State};
use bytes::Bytes;

use supplyhub_core::error::AppError;
use supplyhub_entity::integration::{IntegrationCategory, Integrations};

use crate::dto::request::UpdateIntegrationRequest;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/integrations
pub async fn list_integrations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Integrations>> {
    let integrations = state.integration_service.list(&auth).await?;
    Ok(Json(integrations))
}

/// PUT /api/integrations/{category}
pub async fn update_integration(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Integrations>> {
    let category: IntegrationCategory = category.parse().map_err(AppError::validation)?;
    let UpdateIntegrationRequest(settings) = serde_json::from_slice(&body)
        .map_err(|e| AppError::validation(format!("Invalid integration settings: {e}")))?;

    let integrations = state
        .integration_service
        .update(&auth, category, settings)
        .await?;
    Ok(Json(integrations))
}
