//! In-memory TTL cache using moka

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use moka::future::Cache as MokaCache;
use serde::Serialize;

/// Configuration for an in-memory cache
#[derive(Debug, Clone)]
pub struct TtlCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// TTL applied by `insert`
    pub default_ttl: Duration,
}

impl Default for TtlCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 100,
            default_ttl: Duration::from_secs(600),
        }
    }
}

impl TtlCacheConfig {
    /// Creates a new configuration with specified max capacity
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Sets the default TTL
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

/// Point-in-time cache counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub size: u64,
    pub max_capacity: u64,
    pub ttl_seconds: u64,
    pub hits: u64,
    pub misses: u64,
}

/// Thread-safe in-memory cache with per-entry TTL
///
/// Expiry is decided by an elapsed-time check when an entry is read; there is
/// no background sweep. Capacity eviction is left to moka. Inserts publish the
/// complete value atomically, so readers never observe a partial entry.
#[derive(Debug)]
pub struct TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    name: &'static str,
    cache: MokaCache<K, CacheEntry<V>>,
    config: TtlCacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new cache with the given configuration
    pub fn new(name: &'static str, config: TtlCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .name(name)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            name,
            cache,
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the value if present and younger than its TTL
    pub async fn get(&self, key: &K) -> Option<V> {
        match self.cache.get(key).await {
            Some(entry) if !entry.is_expired() => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value)
            }
            Some(_) => {
                self.cache.invalidate(key).await;
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Inserts a value with the default TTL
    pub async fn insert(&self, key: K, value: V) {
        self.insert_with_ttl(key, value, self.config.default_ttl).await;
    }

    /// Inserts a value with an explicit TTL
    pub async fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
            ttl,
        };

        self.cache.insert(key, entry).await;
    }

    /// Drop every entry. Hit and miss counters are kept.
    pub async fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        tracing::info!(cache = self.name, "Cache cleared");
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;

        CacheStats {
            size: self.cache.entry_count(),
            max_capacity: self.config.max_capacity,
            ttl_seconds: self.config.default_ttl.as_secs(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn cache(ttl: Duration) -> TtlCache<String, Arc<Vec<u32>>> {
        TtlCache::new(
            "test",
            TtlCacheConfig::default().with_default_ttl(ttl),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = cache(Duration::from_secs(60));

        cache.insert("key1".to_string(), Arc::new(vec![1, 2, 3])).await;

        let value = cache.get(&"key1".to_string()).await;
        assert_eq!(value.as_deref(), Some(&vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = cache(Duration::from_secs(60));
        assert!(cache.get(&"missing".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_ttl_expiration_on_read() {
        let cache = cache(Duration::from_millis(50));

        cache.insert("key1".to_string(), Arc::new(vec![1])).await;
        assert!(cache.get(&"key1".to_string()).await.is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get(&"key1".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_explicit_ttl_overrides_default() {
        let cache = cache(Duration::from_secs(60));

        cache
            .insert_with_ttl("short".to_string(), Arc::new(vec![1]), Duration::from_millis(20))
            .await;
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(cache.get(&"short".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_stats_track_hits_and_misses() {
        let cache = cache(Duration::from_secs(600));

        cache.insert("a".to_string(), Arc::new(vec![])).await;
        cache.get(&"a".to_string()).await;
        cache.get(&"a".to_string()).await;
        cache.get(&"b".to_string()).await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert_eq!(stats.ttl_seconds, 600);
        assert_eq!(stats.max_capacity, 100);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = cache(Duration::from_secs(60));

        cache.insert("a".to_string(), Arc::new(vec![])).await;
        cache.insert("b".to_string(), Arc::new(vec![])).await;
        cache.get(&"a".to_string()).await;
        cache.clear().await;

        assert!(cache.get(&"b".to_string()).await.is_none());
        let stats = cache.stats().await;
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hits, 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_and_reads() {
        let cache = Arc::new(cache(Duration::from_secs(60)));

        let tasks: Vec<_> = (0..32u32)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    let key = format!("k{}", i % 4);
                    cache.insert(key.clone(), Arc::new(vec![i; 8])).await;
                    cache.get(&key).await
                })
            })
            .collect();

        for task in futures::future::join_all(tasks).await {
            let value = task.unwrap().expect("entry present after insert");
            // Every observed entry is a complete, uniform vector
            assert_eq!(value.len(), 8);
            assert!(value.iter().all(|v| *v == value[0]));
        }
    }
}
