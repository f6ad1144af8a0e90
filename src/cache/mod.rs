//! Cache Module
//!
//! In-memory response caching with per-endpoint TTLs.

mod entry;
mod key;
pub mod policy;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use policy::{ttl_for, CacheCategory};
pub use stats::{hit_rate_percent, CacheStats};
pub use store::CacheStore;
pub use ttl_cache::TtlCache;
