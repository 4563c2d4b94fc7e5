//! Embedded schema migrations.

use sqlx::PgPool;
use tracing::info;

use supplyhub_core::error::{AppError, ErrorKind};

/// Apply every pending migration from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to run migrations", e))?;

    info!("Database migrations applied");
    Ok(())
}
