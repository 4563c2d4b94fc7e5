//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use supplyhub_core::config::AppConfig;
use supplyhub_core::error::AppError;
use supplyhub_core::types::UserId;
use supplyhub_database::UserStore;
use supplyhub_database::repositories::UserRepository;
use supplyhub_entity::integration::IntegrationCategory;
use supplyhub_entity::user::User;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user; prompts for missing fields
    Create {
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Show a user and the state of each integration
    Show {
        /// User id (UUID)
        user_id: String,
    },
}

/// Integration display row for table output
#[derive(Debug, Serialize, Tabled)]
struct IntegrationRow {
    category: String,
    enabled: bool,
    service: String,
    credentials: String,
}

fn integration_rows(user: &User) -> Vec<IntegrationRow> {
    [
        IntegrationCategory::Ecommerce,
        IntegrationCategory::ErpCrm,
        IntegrationCategory::Iot,
        IntegrationCategory::BiTools,
    ]
    .into_iter()
    .map(|category| {
        let settings = user.integrations.get(category);
        IntegrationRow {
            category: category.to_string(),
            enabled: settings.enabled,
            service: settings
                .service
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            credentials: match &settings.credentials {
                Some(creds) if creds.is_present() => "present".to_string(),
                _ => "missing".to_string(),
            },
        }
    })
    .collect()
}

fn prompt(label: &str) -> Result<String, AppError> {
    dialoguer::Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect_database(&config).await?;
    let users = UserRepository::new(db.pool().clone());

    match &args.command {
        UserCommand::Create { email, name } => {
            let email = match email {
                Some(email) => email.clone(),
                None => prompt("Email")?,
            };
            if !email.contains('@') {
                return Err(AppError::validation(format!("Invalid email: {email}")));
            }
            let name = match name {
                Some(name) => Some(name.clone()),
                None => Some(prompt("Display name")?).filter(|n| !n.trim().is_empty()),
            };

            let user = users.insert(User::new(email, name)).await?;
            output::print_success(&format!("User '{}' created", user.email));
            output::print_kv("ID", &user.id.to_string());
        }
        UserCommand::Show { user_id } => {
            let id: UserId = user_id
                .parse()
                .map_err(|_| AppError::invalid_id(format!("Invalid user id: {user_id}")))?;
            let user = users
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{user_id}' not found")))?;

            match format {
                OutputFormat::Json => output::print_json(&user),
                OutputFormat::Table => {
                    output::print_kv("ID", &user.id.to_string());
                    output::print_kv("Email", &user.email);
                    output::print_kv("Name", user.display_name.as_deref().unwrap_or("-"));
                    output::print_kv(
                        "Created",
                        &user.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    );
                    output::print_list(&integration_rows(&user), format);
                }
            }
        }
    }

    db.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplyhub_entity::integration::{
        IntegrationCredentials, IntegrationService, IntegrationSettings,
    };

    #[test]
    fn test_rows_report_credential_presence() {
        let mut user = User::new("ops@example.com", None);
        user.integrations.set(
            IntegrationCategory::ErpCrm,
            IntegrationSettings {
                enabled: true,
                service: Some(IntegrationService::Sap),
                credentials: Some(IntegrationCredentials {
                    api_key: Some("key".into()),
                    store_url: None,
                }),
            },
        );

        let rows = integration_rows(&user);
        assert_eq!(rows.len(), 4);
        let erp = rows.iter().find(|r| r.category == "erp_crm").unwrap();
        assert!(erp.enabled);
        assert_eq!(erp.service, "sap");
        assert_eq!(erp.credentials, "present");
        assert_eq!(rows[0].credentials, "missing");
    }
}
