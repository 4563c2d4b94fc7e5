//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use supplyhub_auth::JwtDecoder;
use supplyhub_cache::CacheManager;
use supplyhub_core::config::AppConfig;
use supplyhub_database::{DatabasePool, Stores};
use supplyhub_service::{IntegrationSettingsService, NotificationService, WebhookProcessor};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the process started serving
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent on the in-memory backend
    pub db: Option<DatabasePool>,
    /// Store handles for the selected backend
    pub stores: Stores,
    /// Cache manager (Redis or in-memory), holds rate-limit counters
    pub cache: Arc<CacheManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Notification queries and mutations
    pub notification_service: Arc<NotificationService>,
    /// Integration settings of the caller
    pub integration_service: Arc<IntegrationSettingsService>,
    /// Inbound webhook pipeline
    pub webhook_processor: Arc<WebhookProcessor>,
}

impl AppState {
    /// Wire services over the given stores.
    pub fn new(
        config: AppConfig,
        db: Option<DatabasePool>,
        stores: Stores,
        cache: Arc<CacheManager>,
    ) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let notification_service =
            Arc::new(NotificationService::new(Arc::clone(&stores.notifications)));
        let integration_service =
            Arc::new(IntegrationSettingsService::new(Arc::clone(&stores.users)));
        let webhook_processor = Arc::new(WebhookProcessor::new(&stores, &config.webhooks));

        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            db,
            stores,
            cache,
            jwt_decoder,
            notification_service,
            integration_service,
            webhook_processor,
        }
    }
}
