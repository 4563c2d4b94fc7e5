//! Route definitions for the SupplyHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(notification_routes())
        .merge(webhook_routes())
        .merge(integration_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Notification endpoints for the bearer token's user
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications)
                .post(handlers::notification::create_notification),
        )
        .route(
            "/notifications/unread",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}",
            axum::routing::delete(handlers::notification::delete_notification),
        )
}

/// Provider webhook receivers, authenticated by signature
fn webhook_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/webhooks/shopify/orders-create",
            post(handlers::webhook::shopify_orders_create),
        )
        .route(
            "/webhooks/sap/inventory",
            post(handlers::webhook::sap_inventory),
        )
        .route(
            "/webhooks/iot/temperature",
            post(handlers::webhook::iot_temperature),
        )
        .route(
            "/webhooks/powerbi/refresh",
            post(handlers::webhook::powerbi_refresh),
        )
}

/// Integration settings of the caller
fn integration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/integrations",
            get(handlers::integration::list_integrations),
        )
        .route(
            "/integrations/{category}",
            put(handlers::integration::update_integration),
        )
}

/// Health checks (not rate limited)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
