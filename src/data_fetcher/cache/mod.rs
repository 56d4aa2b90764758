pub mod ttl_cache;
pub mod types;

pub use ttl_cache::TtlCache;
pub use types::{CacheCategory, CacheEntry, CacheStats};
