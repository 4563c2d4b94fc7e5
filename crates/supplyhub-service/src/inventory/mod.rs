//! Inventory mutations driven by webhooks.

pub mod service;

pub use service::InventoryService;
