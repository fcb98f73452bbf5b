//! In-memory TTL cache store.
//!
//! Values are stored as JSON so callers can cache any serializable type
//! behind a string key. Keys use `:`-separated prefixes (`sync:status:…`)
//! so whole families can be invalidated at once.

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::task::JoinHandle;

/// Cache errors
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// One stored value with its expiry deadline
#[derive(Debug, Clone)]
struct CacheEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-process TTL cache
///
/// Cheap to share behind an `Arc`; all operations take `&self`.
#[derive(Debug)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
    default_ttl: Duration,
}

impl MemoryCache {
    /// Create a new cache with the given default TTL
    #[must_use]
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
        }
    }

    /// Get a value by key, deserializing into `T`.
    ///
    /// Expired entries are removed on read and reported as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = Instant::now();

        // Clone out of the map guard before any removal; removing while a
        // read guard for the same shard is held would deadlock.
        let entry = self.entries.get(key).map(|e| e.clone());

        match entry {
            Some(entry) if !entry.is_expired(now) => serde_json::from_value(entry.value).ok(),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value under a key.
    ///
    /// Uses the cache's default TTL unless `ttl` is given.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<()> {
        let value =
            serde_json::to_value(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
        let expires_at = Instant::now() + ttl.unwrap_or(self.default_ttl);

        self.entries
            .insert(key.to_string(), CacheEntry { value, expires_at });

        Ok(())
    }

    /// Remove one key. Returns true if it was present.
    pub fn invalidate(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Remove every key starting with `prefix`. Returns how many were removed.
    pub fn invalidate_by_prefix(&self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            tracing::debug!(prefix = %prefix, removed = removed, "Invalidated cache entries");
        }

        removed
    }

    /// Evict every expired entry. Returns how many were evicted.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of live entries (including not-yet-swept expired ones)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the cache holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Spawn the background sweep task for a cache.
///
/// The task holds only a weak reference and exits once the cache is dropped.
pub fn spawn_sweeper(cache: &Arc<MemoryCache>, interval: Duration) -> JoinHandle<()> {
    let cache: Weak<MemoryCache> = Arc::downgrade(cache);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so sweeps start one
        // interval after startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let Some(cache) = cache.upgrade() else {
                break;
            };

            let evicted = cache.sweep();
            if evicted > 0 {
                tracing::debug!(evicted = evicted, "Cache sweep evicted expired entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        id: u32,
        name: String,
    }

    fn payload() -> Payload {
        Payload {
            id: 7,
            name: "seven".to_string(),
        }
    }

    #[test]
    fn test_set_get_round_trip() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("k", &payload(), None).unwrap();

        let got: Option<Payload> = cache.get("k");
        assert_eq!(got, Some(payload()));
    }

    #[test]
    fn test_miss_on_unknown_key() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        let got: Option<Payload> = cache.get("absent");
        assert!(got.is_none());
    }

    #[test]
    fn test_expired_entry_is_a_miss_and_removed() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("k", &payload(), Some(Duration::ZERO)).unwrap();

        let got: Option<Payload> = cache.get("k");
        assert!(got.is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_by_prefix() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("sync:status:g1", &1u32, None).unwrap();
        cache.set("sync:status:g2", &2u32, None).unwrap();
        cache.set("members:g1", &3u32, None).unwrap();

        let removed = cache.invalidate_by_prefix("sync:status:");
        assert_eq!(removed, 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get::<u32>("members:g1"), Some(3));
    }

    #[test]
    fn test_sweep_evicts_only_expired() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("old", &1u32, Some(Duration::ZERO)).unwrap();
        cache.set("fresh", &2u32, None).unwrap();

        let evicted = cache.sweep();
        assert_eq!(evicted, 1);
        assert_eq!(cache.get::<u32>("fresh"), Some(2));
    }

    #[tokio::test]
    async fn test_sweeper_exits_when_cache_dropped() {
        let cache = Arc::new(MemoryCache::new(Duration::from_secs(60)));
        let handle = spawn_sweeper(&cache, Duration::from_millis(1));

        drop(cache);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper did not exit")
            .unwrap();
    }
}
