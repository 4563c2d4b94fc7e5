//! Third-party integration registrations carried on the user record.

pub mod category;
pub mod settings;

pub use category::{IntegrationCategory, IntegrationService};
pub use settings::{IntegrationCredentials, IntegrationSettings, IntegrationState, Integrations};
