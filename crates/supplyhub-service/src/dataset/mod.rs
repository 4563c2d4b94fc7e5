//! BI dataset refresh tracking.

pub mod service;

pub use service::DatasetService;
