//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use supplyhub_entity::integration::IntegrationSettings;
use supplyhub_entity::notification::NotificationPayload;

/// Body of `POST /api/notifications`.
///
/// The payload is type-tagged: `{"type": "SYSTEM", "payload": {...}}` sits
/// next to `title` and `message`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    /// Short headline.
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Body text.
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
    /// Typed payload.
    #[serde(flatten)]
    pub payload: NotificationPayload,
}

/// Body of `PUT /api/integrations/{category}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateIntegrationRequest(pub IntegrationSettings);

#[cfg(test)]
mod tests {
    use super::*;
    use supplyhub_entity::notification::NotificationType;

    #[test]
    fn test_create_request_reads_tagged_payload() {
        let body = serde_json::json!({
            "title": "Maintenance",
            "message": "Downtime at 02:00",
            "type": "SYSTEM",
            "payload": { "source": "ops" }
        });
        let req: CreateNotificationRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.payload.kind(), NotificationType::System);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let body = serde_json::json!({
            "title": "",
            "message": "m",
            "type": "SYSTEM",
            "payload": {}
        });
        let req: CreateNotificationRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_err());
    }
}
