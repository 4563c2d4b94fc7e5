//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use supplyhub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Error body returned to webhook callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::InvalidId | ErrorKind::Serialization => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden | ErrorKind::IntegrationDisabled | ErrorKind::MissingCredentials => {
            StatusCode::FORBIDDEN
        }
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal | ErrorKind::Database | ErrorKind::Cache | ErrorKind::Configuration => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Server faults are logged with their cause and answered with a generic
/// message so internals never reach the client.
fn client_message(err: &AppError) -> String {
    if err.kind.is_server_error() && err.kind != ErrorKind::ServiceUnavailable {
        tracing::error!(kind = ?err.kind, error = %err.message, source = ?err.source, "Internal server error");
        "An unexpected error occurred".to_string()
    } else {
        err.message.clone()
    }
}

/// Wrapper for handler results that must answer in the webhook shape.
#[derive(Debug)]
pub struct WebhookError(pub AppError);

impl From<AppError> for WebhookError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind);
        let body = WebhookErrorResponse {
            success: false,
            code: self.0.code().to_string(),
            message: client_message(&self.0),
        };
        (status, Json(body)).into_response()
    }
}

/// Newtype so `AppError` can implement the foreign `IntoResponse` trait.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind);
        let body = ApiErrorResponse {
            code: self.0.code().to_string(),
            message: client_message(&self.0),
        };
        (status, Json(body)).into_response()
    }
}

/// Result alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
