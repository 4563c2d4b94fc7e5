//! Start the SupplyHub server.

use clap::Args;

use supplyhub_core::config::{AppConfig, DatabaseBackend};
use supplyhub_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Use the in-memory persistence backend
    #[arg(long)]
    pub memory: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.memory {
        config.database.backend = DatabaseBackend::Memory;
    }

    println!("Starting SupplyHub server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!("  Backend: {:?}", config.database.backend);

    supplyhub_api::run_server(config).await
}
