//! In-memory store implementations.
//!
//! Each store keeps its records in a map behind a `tokio::sync::RwLock`.
//! Every trait method takes the write lock once for the whole
//! find-and-update, which gives the same per-entity atomicity as the single
//! SQL statements of the PostgreSQL repositories. Nothing is durable.

mod dataset;
mod inventory;
mod notification;
mod user;
mod warehouse;
mod webhook_delivery;

pub use dataset::MemoryDatasetStore;
pub use inventory::MemoryInventoryStore;
pub use notification::MemoryNotificationStore;
pub use user::MemoryUserStore;
pub use warehouse::MemoryWarehouseStore;
pub use webhook_delivery::MemoryWebhookDeliveryStore;
