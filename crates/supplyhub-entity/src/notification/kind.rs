//! Notification type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The business event a notification describes.
///
/// Stored in the `kind` column and used as the tag of
/// [`NotificationPayload`](super::NotificationPayload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// A storefront order was received.
    OrderUpdate,
    /// An inventory item fell to or below its minimum stock.
    InventoryAlert,
    /// An inventory item was overwritten from an ERP snapshot.
    InventoryUpdate,
    /// A warehouse zone received a temperature reading.
    WarehouseUpdate,
    /// A BI dataset refresh completed.
    IntegrationSync,
    /// An integration reported a failure or state change.
    IntegrationStatus,
    /// Operator or system message.
    System,
}

impl NotificationType {
    /// All known types, in declaration order.
    pub const ALL: [NotificationType; 7] = [
        Self::OrderUpdate,
        Self::InventoryAlert,
        Self::InventoryUpdate,
        Self::WarehouseUpdate,
        Self::IntegrationSync,
        Self::IntegrationStatus,
        Self::System,
    ];

    /// Return the type as its wire/storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderUpdate => "ORDER_UPDATE",
            Self::InventoryAlert => "INVENTORY_ALERT",
            Self::InventoryUpdate => "INVENTORY_UPDATE",
            Self::WarehouseUpdate => "WAREHOUSE_UPDATE",
            Self::IntegrationSync => "INTEGRATION_SYNC",
            Self::IntegrationStatus => "INTEGRATION_STATUS",
            Self::System => "SYSTEM",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown notification type: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_round_trips_through_from_str() {
        for kind in NotificationType::ALL {
            assert_eq!(kind.as_str().parse::<NotificationType>(), Ok(kind));
        }
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&NotificationType::InventoryAlert).unwrap();
        assert_eq!(json, "\"INVENTORY_ALERT\"");
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!("PAYMENT".parse::<NotificationType>().is_err());
    }
}
