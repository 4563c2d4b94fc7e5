//! Inbound webhook entities.

pub mod delivery;

pub use delivery::{WebhookDelivery, WebhookProvider};
