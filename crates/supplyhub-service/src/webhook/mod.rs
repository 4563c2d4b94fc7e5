//! Inbound webhook pipeline.
//!
//! Every provider follows VERIFY → PARSE → LOCATE_USER → DEDUPE → MUTATE →
//! NOTIFY → DONE and stops at the first failing gate. Nothing is written
//! before the dedupe gate, and notification failures after the mutation are
//! logged without changing the outcome.

pub mod payload;
pub mod processor;
pub mod stage;

pub use processor::{WebhookOutcome, WebhookProcessor, WebhookRequest};
pub use stage::WebhookStage;
