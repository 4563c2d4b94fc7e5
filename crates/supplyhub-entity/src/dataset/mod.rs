//! BI dataset entities.

pub mod model;

pub use model::{Dataset, RefreshRecord, RefreshStatus};
