//! Integration lookup for webhooks and settings management for users.

pub mod locator;
pub mod service;

pub use locator::IntegrationLocator;
pub use service::IntegrationSettingsService;
