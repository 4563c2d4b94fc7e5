//! PostgreSQL implementations of the store traits.

pub mod dataset;
pub mod inventory;
pub mod notification;
pub mod user;
pub mod warehouse;
pub mod webhook_delivery;

pub use dataset::DatasetRepository;
pub use inventory::InventoryRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
pub use warehouse::WarehouseRepository;
pub use webhook_delivery::WebhookDeliveryRepository;
