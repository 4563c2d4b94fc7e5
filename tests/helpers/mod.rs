//! Shared helpers for router-level tests against the in-memory backend.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use supplyhub_api::AppState;
use supplyhub_auth::{JwtEncoder, WebhookVerifier};
use supplyhub_cache::CacheManager;
use supplyhub_core::config::{AppConfig, DatabaseBackend, WebhookSecrets};
use supplyhub_database::Stores;
use supplyhub_entity::integration::{
    IntegrationCredentials, IntegrationService, IntegrationSettings,
};
use supplyhub_entity::user::User;
use supplyhub_entity::webhook::WebhookProvider;

pub const SECRET: &str = "test-webhook-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store handles, for seeding and direct assertions
    pub stores: Stores,
    /// Application config
    pub config: AppConfig,
    verifier: WebhookVerifier,
    encoder: JwtEncoder,
}

/// Configuration with every webhook secret set and rate limiting off.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.backend = DatabaseBackend::Memory;
    config.cache.provider = "memory".to_string();
    config.auth.jwt_secret = "test-jwt-secret".to_string();
    config.rate_limit.enabled = false;
    config.webhooks.secrets = WebhookSecrets {
        shopify: SECRET.to_string(),
        sap: SECRET.to_string(),
        power_bi: SECRET.to_string(),
        iot: SECRET.to_string(),
    };
    config
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application with custom configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let stores = Stores::memory();
        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let state = AppState::new(config.clone(), None, stores.clone(), cache);

        Self {
            router: supplyhub_api::build_app(state),
            stores,
            verifier: WebhookVerifier::new(config.webhooks.secrets.clone()),
            encoder: JwtEncoder::new(&config.auth),
            config,
        }
    }

    /// Insert a user with the given integrations enabled and credentialed
    pub async fn create_user(&self, email: &str, services: &[IntegrationService]) -> User {
        let mut user = User::new(email, Some("Test User".to_string()));
        for service in services {
            user.integrations.set(
                service.category(),
                IntegrationSettings {
                    enabled: true,
                    service: Some(*service),
                    credentials: Some(IntegrationCredentials {
                        api_key: Some("api-key".to_string()),
                        store_url: Some("https://acme.myshopify.com".to_string()),
                    }),
                },
            );
        }
        self.stores
            .users
            .insert(user)
            .await
            .expect("Failed to insert user")
    }

    /// Issue a bearer token for a user
    pub fn token_for(&self, user: &User) -> String {
        self.encoder
            .issue(user.id)
            .expect("Failed to issue token")
            .access_token
    }

    /// Send a JSON API request
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// POST a webhook body signed with the shared secret
    pub async fn webhook(
        &self,
        provider: WebhookProvider,
        path: &str,
        body: &str,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let signature = self
            .verifier
            .sign(provider, body.as_bytes())
            .expect("Secret configured");
        let mut all = vec![(WebhookVerifier::signature_header(provider), signature.as_str())];
        all.extend_from_slice(headers);
        self.raw_webhook(path, body, &all).await
    }

    /// POST a webhook body with exactly the given headers
    pub async fn raw_webhook(&self, path: &str, body: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json");
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        let req = req
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
