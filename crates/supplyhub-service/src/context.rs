//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use supplyhub_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the API layer from a verified bearer token and passed into
/// service methods so that every query is scoped to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// Token id, for log correlation.
    pub token_id: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, token_id: Option<String>) -> Self {
        Self {
            user_id,
            token_id,
            request_time: Utc::now(),
        }
    }

    /// Context for a user with no token, e.g. in tests and CLI tooling.
    pub fn for_user(user_id: UserId) -> Self {
        Self::new(user_id, None)
    }
}
