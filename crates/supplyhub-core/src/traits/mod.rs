//! Core traits defined in `supplyhub-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
