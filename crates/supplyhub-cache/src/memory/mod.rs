//! In-process cache provider.

mod store;

pub use store::MemoryCacheProvider;
