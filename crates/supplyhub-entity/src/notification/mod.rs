//! Notification domain entities.

pub mod kind;
pub mod model;
pub mod payload;

pub use kind::NotificationType;
pub use model::{NewNotification, Notification};
pub use payload::{
    DatasetRefreshPayload, IntegrationStatusPayload, InventoryAlertPayload,
    InventoryUpdatePayload, NotificationPayload, OrderLinePayload, OrderUpdatePayload,
    SystemPayload, WarehouseUpdatePayload,
};
