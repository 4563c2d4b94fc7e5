//! Fixed-window rate limiting over shared cache counters.
//!
//! Each request increments `rate:{route}:{caller}:{window}` in the cache
//! provider, so limits hold across instances when Redis is configured.
//! Cache failures let the request through.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::{MatchedPath, Request, State};
use axum::http::HeaderValue;
use axum::http::header::RETRY_AFTER;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use supplyhub_cache::keys;
use supplyhub_core::error::AppError;
use supplyhub_core::traits::CacheProvider;

use crate::error::{ApiError, WebhookError};
use crate::state::AppState;

const WEBHOOK_PREFIX: &str = "/api/webhooks/";

/// Rejects requests over the per-route, per-caller budget with 429.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let config = &state.config.rate_limit;
    if !config.enabled || config.window_seconds == 0 {
        return next.run(request).await;
    }

    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let is_webhook = route.starts_with(WEBHOOK_PREFIX);
    let limit = if is_webhook {
        config.webhook_requests_per_window
    } else {
        config.api_requests_per_window
    };

    let caller = caller_key(&state, &request);
    let window = current_window(config.window_seconds);
    let key = keys::rate_limit(&route, &caller, window);

    match hit(&state, &key, config.window_seconds).await {
        Ok(count) if count > i64::from(limit) => {
            warn!(route = %route, caller = %caller, count, limit, "Rate limit exceeded");
            let err = AppError::rate_limited("Too many requests, slow down");
            let mut response = if is_webhook {
                WebhookError(err).into_response()
            } else {
                ApiError(err).into_response()
            };
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(config.window_seconds));
            response
        }
        Ok(_) => next.run(request).await,
        Err(e) => {
            warn!(error = %e, "Rate limit check failed, allowing request");
            next.run(request).await
        }
    }
}

async fn hit(state: &AppState, key: &str, window_seconds: u64) -> Result<i64, AppError> {
    let count = state.cache.incr(key).await?;
    if count == 1 {
        state
            .cache
            .expire(key, Duration::from_secs(window_seconds))
            .await?;
    }
    Ok(count)
}

/// Token subject when the bearer token is valid, else the forwarded client
/// address, else `anonymous`.
fn caller_key(state: &AppState, request: &Request) -> String {
    let headers = request.headers();
    let subject = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| state.jwt_decoder.decode(token.trim()).ok())
        .map(|claims| format!("user:{}", claims.sub));
    if let Some(subject) = subject {
        return subject;
    }

    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(|ip| format!("ip:{ip}"))
        .unwrap_or_else(|| "anonymous".to_string())
}

fn current_window(window_seconds: u64) -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    now / window_seconds
}
