//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use supplyhub_core::types::UserId;

use crate::integration::Integrations;

/// A dashboard user and their integration registrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Integration slots, stored as JSONB.
    pub integrations: Integrations,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user with no integrations configured.
    pub fn new(email: impl Into<String>, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email: email.into(),
            display_name,
            integrations: Integrations::default(),
            created_at: now,
            updated_at: now,
        }
    }
}
