//! Typed path parameter helpers.

use supplyhub_core::error::AppError;
use supplyhub_core::types::NotificationId;

/// Parses a notification id from a path segment before any store is touched.
pub fn parse_notification_id(s: &str) -> Result<NotificationId, AppError> {
    s.parse()
        .map_err(|_| AppError::invalid_id(format!("Invalid notification id: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_id_is_invalid_id() {
        let err = parse_notification_id("not-a-uuid").unwrap_err();
        assert_eq!(err.code(), "INVALID_ID");
    }

    #[test]
    fn test_valid_id_parses() {
        let id = NotificationId::new();
        assert_eq!(parse_notification_id(&id.to_string()).unwrap(), id);
    }
}
