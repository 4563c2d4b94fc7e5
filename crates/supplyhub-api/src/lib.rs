//! # supplyhub-api
//!
//! HTTP API layer for SupplyHub built on Axum.
//!
//! Provides the notification and integration endpoints, the inbound webhook
//! receivers, middleware (rate limiting, CORS, request logging), extractors,
//! DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
