//! Health check handlers.

use axum::Json;
use axum::extract::State;

use supplyhub_core::traits::CacheProvider;

use crate::dto::response::{ComponentHealth, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let database = match &state.db {
        Some(db) => match db.health_check().await {
            Ok(true) => ComponentHealth::up(),
            Ok(false) => ComponentHealth::down("database did not answer"),
            Err(e) => ComponentHealth::down(e.message),
        },
        None => ComponentHealth::in_memory(),
    };

    let cache = match state.cache.health_check().await {
        Ok(true) => ComponentHealth::up(),
        Ok(false) => ComponentHealth::down("cache did not answer"),
        Err(e) => ComponentHealth::down(e.message),
    };

    let status = if database.is_down() || cache.is_down() {
        "degraded"
    } else {
        "ok"
    };

    Json(DetailedHealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database,
        cache,
    })
}
