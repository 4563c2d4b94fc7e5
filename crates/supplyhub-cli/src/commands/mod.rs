//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod serve;
pub mod token;
pub mod user;

use clap::{Parser, Subcommand};

use supplyhub_core::config::{AppConfig, DatabaseBackend};
use supplyhub_core::error::AppError;
use supplyhub_database::DatabasePool;

use crate::output::OutputFormat;

/// SupplyHub: integration event fan-out service
#[derive(Debug, Parser)]
#[command(name = "supplyhub", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and {env}.toml
    #[arg(short, long, default_value = "config", env = "SUPPLYHUB_CONFIG_DIR")]
    pub config: String,

    /// Environment overlay to apply
    #[arg(short, long, default_value = "development", env = "SUPPLYHUB_ENV")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the SupplyHub server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Bearer token issuing
    Token(token::TokenArgs),
    /// User management
    User(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, self.load_config()?).await,
            Commands::Migrate(args) => migrate::execute(args, self.load_config()?).await,
            Commands::Config(args) => config::execute(args, self, self.format),
            Commands::Token(args) => token::execute(args, self.load_config()?, self.format),
            Commands::User(args) => user::execute(args, self.load_config()?, self.format).await,
        }
    }

    /// Load configuration for the selected directory and environment
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config, &self.env)
    }
}

/// Connect to PostgreSQL, refusing the in-memory backend.
pub async fn connect_database(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if config.database.backend == DatabaseBackend::Memory {
        return Err(AppError::configuration(
            "This command needs the postgres backend; database.backend is 'memory'",
        ));
    }
    DatabasePool::connect(&config.database).await
}
