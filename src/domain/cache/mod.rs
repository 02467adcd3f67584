//! Cache domain - canonical key construction for the in-memory caches

mod key;

pub use key::CacheKey;
