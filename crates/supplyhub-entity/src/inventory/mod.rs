//! Inventory domain entities.

pub mod model;

pub use model::{InventoryItem, InventorySnapshot};
