//! Inbound webhook receivers.
//!
//! Handlers only lift headers and the raw body into a [`WebhookRequest`];
//! signature checks run over the exact bytes received.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use bytes::Bytes;

use supplyhub_auth::WebhookVerifier;
use supplyhub_entity::webhook::WebhookProvider;
use supplyhub_service::{WebhookOutcome, WebhookRequest};

use crate::dto::response::WebhookResponse;
use crate::error::WebhookError;
use crate::state::AppState;

type WebhookResult = Result<Json<WebhookResponse>, WebhookError>;

/// Header carrying the provider's delivery id, used for deduplication.
pub fn event_id_header(provider: WebhookProvider) -> &'static str {
    match provider {
        WebhookProvider::Shopify => "X-Shopify-Webhook-Id",
        WebhookProvider::Sap => "X-SAP-Event-Id",
        WebhookProvider::PowerBi => "X-PowerBI-Event-Id",
        WebhookProvider::Iot => "X-IoT-Message-Id",
    }
}

const SHOP_DOMAIN_HEADER: &str = "X-Shopify-Shop-Domain";

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn webhook_request(provider: WebhookProvider, headers: &HeaderMap, body: Bytes) -> WebhookRequest {
    WebhookRequest {
        signature: header(headers, WebhookVerifier::signature_header(provider)),
        event_id: header(headers, event_id_header(provider)),
        shop_domain: match provider {
            WebhookProvider::Shopify => header(headers, SHOP_DOMAIN_HEADER),
            _ => None,
        },
        body,
    }
}

fn respond(outcome: WebhookOutcome) -> Json<WebhookResponse> {
    Json(WebhookResponse {
        success: true,
        message: outcome.message,
    })
}

/// POST /api/webhooks/shopify/orders-create
pub async fn shopify_orders_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> WebhookResult {
    let request = webhook_request(WebhookProvider::Shopify, &headers, body);
    let outcome = state.webhook_processor.shopify_order(request).await?;
    Ok(respond(outcome))
}

/// POST /api/webhooks/sap/inventory
pub async fn sap_inventory(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> WebhookResult {
    let request = webhook_request(WebhookProvider::Sap, &headers, body);
    let outcome = state.webhook_processor.sap_inventory(request).await?;
    Ok(respond(outcome))
}

/// POST /api/webhooks/iot/temperature
pub async fn iot_temperature(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> WebhookResult {
    let request = webhook_request(WebhookProvider::Iot, &headers, body);
    let outcome = state.webhook_processor.iot_temperature(request).await?;
    Ok(respond(outcome))
}

/// POST /api/webhooks/powerbi/refresh
pub async fn powerbi_refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> WebhookResult {
    let request = webhook_request(WebhookProvider::PowerBi, &headers, body);
    let outcome = state.webhook_processor.powerbi_refresh(request).await?;
    Ok(respond(outcome))
}
