//! Cache infrastructure - in-memory TTL caches

mod in_memory;

pub use in_memory::{CacheStats, TtlCache, TtlCacheConfig};
