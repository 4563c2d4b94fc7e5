//! Application builder: wires stores, services, and router into a running server.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{info, warn};

use supplyhub_cache::CacheManager;
use supplyhub_core::config::{AppConfig, DatabaseBackend};
use supplyhub_core::error::AppError;
use supplyhub_database::{DatabasePool, Stores};
use supplyhub_service::RetentionTask;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Connects the configured backend and cache and assembles `AppState`.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let (db, stores) = match config.database.backend {
        DatabaseBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let db = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                supplyhub_database::migration::run_migrations(db.pool()).await?;
            }
            let stores = Stores::postgres(&db);
            (Some(db), stores)
        }
        DatabaseBackend::Memory => {
            warn!("Using in-memory persistence, data is lost on restart");
            (None, Stores::memory())
        }
    };

    info!("Initializing cache (provider: {})...", config.cache.provider);
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    Ok(AppState::new(config, db, stores, cache))
}

/// Runs the SupplyHub server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting SupplyHub server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = build_state(config).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let retention = RetentionTask::new(
        Arc::clone(&state.stores.notifications),
        Arc::clone(&state.stores.deliveries),
        &state.config.notifications,
        &state.config.webhooks,
    );
    let retention_handle = tokio::spawn(async move {
        retention.run(shutdown_rx).await;
    });

    let db = state.db.clone();
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("SupplyHub server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if tokio::time::timeout(grace, retention_handle).await.is_err() {
        warn!("Retention task did not stop within {}s", grace.as_secs());
    }
    if let Some(db) = db {
        db.close().await;
    }

    info!("SupplyHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
