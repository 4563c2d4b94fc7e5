//! # supplyhub-core
//!
//! Core crate for SupplyHub. Contains the unified error system,
//! configuration schemas, typed identifiers, pagination types, and the
//! cache provider trait.
//!
//! This crate has **no** internal dependencies on other SupplyHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
