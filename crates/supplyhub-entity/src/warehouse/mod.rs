//! Warehouse domain entities.

pub mod model;

pub use model::{TemperatureAlert, TemperatureReading, Warehouse, Zone};
