//! In-memory cache implementation with LRU eviction.
//!
//! Thread-safe store with per-entry TTL. Expired entries are evicted when
//! read; [`MemoryCache::purge_expired`] sweeps the rest.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use biodash_core::cache::{pattern_matches, Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    stored_at: Instant,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let stored_at = Instant::now();
        Self {
            value,
            stored_at,
            // A TTL past the clock's range never expires.
            expires_at: ttl.and_then(|d| stored_at.checked_add(d)),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Clones share the same store, so one instance can serve every request in
/// the process.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_entries` values; the least
    /// recently used entry is evicted beyond that. Zero is treated as one.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut store = self.store.write().await;
        let expired: Vec<String> = store
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            store.pop(key);
        }
        if !expired.is_empty() {
            tracing::debug!(purged = expired.len(), "Purged expired cache entries");
        }
        expired.len()
    }

    /// Number of stored entries, expired ones included until evicted.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Age of the entry under `key`, if present and not expired.
    pub async fn age(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let store = self.store.read().await;
        store
            .peek(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| now.duration_since(entry.stored_at))
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // LruCache::get updates recency, so a write lock is needed either way.
        let mut store = self.store.write().await;

        let expired = match store.get(key) {
            Some(entry) if !entry.is_expired(Instant::now()) => {
                return Ok(Some(entry.value.clone()))
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            store.pop(key);
            tracing::trace!(key = %key, "Evicted expired cache entry");
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let mut store = self.store.write().await;
        let keys_to_delete: Vec<String> = store
            .iter()
            .filter(|(key, _)| pattern_matches(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &keys_to_delete {
            store.pop(key);
        }
        Ok(())
    }
}
