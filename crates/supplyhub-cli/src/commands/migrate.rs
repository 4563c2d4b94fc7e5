//! Database migration management commands.

use clap::{Args, Subcommand};

use supplyhub_core::config::AppConfig;
use supplyhub_core::error::AppError;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: AppConfig) -> Result<(), AppError> {
    let db = super::connect_database(&config).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            supplyhub_database::migration::run_migrations(db.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
    }

    db.close().await;
    Ok(())
}
