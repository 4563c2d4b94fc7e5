//! # supplyhub-auth
//!
//! Authentication primitives for SupplyHub.
//!
//! ## Modules
//!
//! - `jwt`: HS256 bearer-token issuing and validation
//! - `webhook`: per-provider webhook signature verification

pub mod jwt;
pub mod webhook;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use webhook::WebhookVerifier;
