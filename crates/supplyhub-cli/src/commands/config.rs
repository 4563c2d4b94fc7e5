//! Configuration inspection commands.

use clap::{Args, Subcommand};

use supplyhub_core::error::AppError;
use supplyhub_database::connection::mask_password;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Load the configuration and report problems
    Validate,
}

/// Placeholder shown in place of secrets.
const MASK: &str = "****";

/// Execute config commands
pub fn execute(args: &ConfigArgs, cli: &Cli, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut config = cli.load_config()?;
            config.database.url = mask_password(&config.database.url);
            config.auth.jwt_secret = MASK.to_string();
            for secret in [
                &mut config.webhooks.secrets.shopify,
                &mut config.webhooks.secrets.sap,
                &mut config.webhooks.secrets.power_bi,
                &mut config.webhooks.secrets.iot,
            ] {
                if !secret.is_empty() {
                    *secret = MASK.to_string();
                }
            }
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => println!("{config:#?}"),
            }
        }
        ConfigCommand::Validate => match cli.load_config() {
            Ok(config) => {
                output::print_success(&format!(
                    "Configuration '{}' ({}) is valid",
                    cli.config, cli.env
                ));
                output::print_kv(
                    "Server",
                    &format!("{}:{}", config.server.host, config.server.port),
                );
                output::print_kv("Backend", &format!("{:?}", config.database.backend));
                output::print_kv("Database", &mask_password(&config.database.url));
                output::print_kv("Cache", &config.cache.provider);
                if config.auth.jwt_secret == "CHANGE_ME_IN_PRODUCTION" {
                    println!("  warning: auth.jwt_secret still has its default value");
                }
                let secrets = &config.webhooks.secrets;
                for (provider, secret) in [
                    ("shopify", &secrets.shopify),
                    ("sap", &secrets.sap),
                    ("power_bi", &secrets.power_bi),
                    ("iot", &secrets.iot),
                ] {
                    if secret.is_empty() {
                        println!("  warning: no webhook secret for {provider}, its webhooks will be rejected");
                    }
                }
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}
