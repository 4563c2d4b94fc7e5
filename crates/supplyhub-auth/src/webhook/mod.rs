//! Webhook signature verification.

pub mod verifier;

pub use verifier::{SignatureScheme, WebhookVerifier};
