//! Warehouse zone readings.

pub mod service;

pub use service::WarehouseService;
