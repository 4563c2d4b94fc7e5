//! Notification handlers. Every route is scoped to the bearer token's user.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use bytes::Bytes;
use validator::Validate;

use supplyhub_core::error::AppError;
use supplyhub_core::types::PageResponse;
use supplyhub_entity::notification::Notification;

use crate::dto::request::CreateNotificationRequest;
use crate::dto::response::{CountResponse, MarkedResponse, SuccessResponse};
use crate::error::ApiResult;
use crate::extractors::path::parse_notification_id;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<Notification>>> {
    let page = state
        .notification_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(page))
}

/// GET /api/notifications/unread
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CountResponse>> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(CountResponse { count }))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Notification>> {
    let id = parse_notification_id(&id)?;
    let notification = state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(notification))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MarkedResponse>> {
    let marked = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(MarkedResponse { marked }))
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = parse_notification_id(&id)?;
    state.notification_service.delete(&auth, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Notification>)> {
    let req: CreateNotificationRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::validation(format!("Invalid notification body: {e}")))?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let notification = state
        .notification_service
        .create(&auth, req.title, req.message, req.payload)
        .await?;
    Ok((StatusCode::CREATED, Json(notification)))
}
