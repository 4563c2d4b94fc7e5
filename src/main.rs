//! SupplyHub Server: integration event fan-out.
//!
//! Main entry point that loads configuration, installs logging, and starts
//! the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use supplyhub_core::config::{AppConfig, LoggingConfig};
use supplyhub_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);
    tracing::info!("Starting SupplyHub v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = supplyhub_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load `{dir}/default.toml`, the environment overlay, and `SUPPLYHUB__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("SUPPLYHUB_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("SUPPLYHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
