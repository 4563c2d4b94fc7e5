//! Issue bearer tokens for API access.

use chrono::Duration;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use supplyhub_auth::JwtEncoder;
use supplyhub_core::config::AppConfig;
use supplyhub_core::error::AppError;
use supplyhub_core::types::UserId;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue an access token for a user id
    Issue {
        /// User id (UUID)
        user_id: String,
        /// Lifetime in minutes, defaults to auth.jwt_access_ttl_minutes
        #[arg(long)]
        ttl_minutes: Option<u64>,
    },
}

/// One year.
const MAX_TTL_MINUTES: u64 = 60 * 24 * 365;

#[derive(Debug, Serialize, Tabled)]
struct TokenRow {
    user_id: String,
    expires_at: String,
    access_token: String,
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue {
            user_id,
            ttl_minutes,
        } => {
            let user_id: UserId = user_id
                .parse()
                .map_err(|_| AppError::invalid_id(format!("Invalid user id: {user_id}")))?;
            let encoder = JwtEncoder::new(&config.auth);
            let issued = match ttl_minutes {
                Some(minutes) => {
                    if *minutes == 0 || *minutes > MAX_TTL_MINUTES {
                        return Err(AppError::validation(format!(
                            "ttl-minutes must be between 1 and {MAX_TTL_MINUTES}"
                        )));
                    }
                    encoder.issue_with_ttl(user_id, Duration::minutes(*minutes as i64))?
                }
                None => encoder.issue(user_id)?,
            };

            let row = TokenRow {
                user_id: user_id.to_string(),
                expires_at: issued.expires_at.to_rfc3339(),
                access_token: issued.access_token,
            };
            output::print_list(&[row], format);
        }
    }
    Ok(())
}
