//! # supplyhub-cache
//!
//! Cache providers for SupplyHub. The cache holds the fixed-window
//! rate-limit counters.
//!
//! - **memory**: in-process, bounded and self-expiring, using [moka](https://crates.io/crates/moka)
//! - **redis**: shared across instances, using the [redis](https://crates.io/crates/redis) crate

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
