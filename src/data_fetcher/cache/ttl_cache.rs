use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::types::{CacheEntry, CacheStats};
use crate::constants;

/// String-keyed in-memory cache whose entries expire after a per-entry TTL.
///
/// Backed by an LRU map so a long-running session cannot grow it without
/// bound. Expired entries are evicted lazily when they are looked up.
#[derive(Debug)]
pub struct TtlCache<V: Clone> {
    entries: LruCache<String, CacheEntry<V>>,
    hits: u64,
    misses: u64,
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(constants::cache::DEFAULT_CAPACITY)
    }
}

impl<V: Clone> TtlCache<V> {
    /// Creates a cache holding at most `capacity` entries (a zero capacity is
    /// treated as one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        self.set_at(key, value, ttl, Instant::now());
    }

    pub fn set_at(&mut self, key: impl Into<String>, value: V, ttl: Duration, now: Instant) {
        let key = key.into();
        debug!("Caching entry: key={}, ttl={:?}", key, ttl);
        self.entries.put(key, CacheEntry::new_at(value, ttl, now));
    }

    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Returns the value when it is younger than its TTL, evicting it otherwise.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.hits += 1;
                debug!(
                    "Cache hit: key={}, remaining={:?}",
                    key,
                    entry.time_until_expiry_at(now)
                );
                return Some(entry.value.clone());
            }
            Some(entry) => {
                warn!(
                    "Removing expired cache entry: key={}, ttl={:?}",
                    key, entry.ttl
                );
                true
            }
            None => false,
        };

        if expired {
            self.entries.pop(key);
        } else {
            debug!("Cache miss: key={}", key);
        }
        self.misses += 1;
        None
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.pop(key).map(|entry| entry.value)
    }

    pub fn clear(&mut self) {
        debug!("Clearing {} cache entries", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats::from_counts(self.len(), self.capacity(), self.hits, self.misses)
    }

    /// Resets hit/miss counters without touching the entries
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }
}
