//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an environment overlay, and `SUPPLYHUB__*`
//! environment variables. Each sub-module represents one section.

pub mod app;
pub mod auth;
pub mod cache;
pub mod database;
pub mod logging;
pub mod notification;
pub mod rate_limit;
pub mod webhook;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::cache::CacheConfig;
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::logging::LoggingConfig;
pub use self::notification::NotificationConfig;
pub use self::rate_limit::RateLimitConfig;
pub use self::webhook::{WebhookConfig, WebhookSecrets};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Cache provider settings (rate-limit counters).
    #[serde(default)]
    pub cache: CacheConfig,
    /// Bearer-token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Inbound webhook settings.
    #[serde(default)]
    pub webhooks: WebhookConfig,
    /// Request rate limiting.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Notification retention.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `{dir}/default.toml`, `{dir}/{env}.toml`, and
    /// environment variables prefixed with `SUPPLYHUB__`.
    pub fn load(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SUPPLYHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
