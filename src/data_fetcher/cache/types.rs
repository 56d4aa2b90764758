//! Cache data structures with TTL support

use std::time::{Duration, Instant};

use crate::constants::cache_ttl;

/// A cached value together with the instant it was stored and its lifetime
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub cached_at: Instant,
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, ttl: Duration) -> Self {
        Self::new_at(value, ttl, Instant::now())
    }

    pub fn new_at(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            cached_at: now,
            ttl,
        }
    }

    /// Checks if the cached data is expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// An entry is fresh while its age is strictly below the ttl.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.cached_at) >= self.ttl
    }

    /// Gets the remaining time until expiration
    pub fn time_until_expiry_at(&self, now: Instant) -> Duration {
        self.ttl
            .saturating_sub(now.saturating_duration_since(self.cached_at))
    }
}

/// Freshness class of an endpoint, each with its own TTL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheCategory {
    Live,
    Daily,
    Standings,
    Season,
    Competitor,
    Static,
}

impl CacheCategory {
    pub fn ttl(self) -> Duration {
        let seconds = match self {
            CacheCategory::Live => cache_ttl::LIVE_SECONDS,
            CacheCategory::Daily => cache_ttl::DAILY_SECONDS,
            CacheCategory::Standings => cache_ttl::STANDINGS_SECONDS,
            CacheCategory::Season => cache_ttl::SEASON_SECONDS,
            CacheCategory::Competitor => cache_ttl::COMPETITOR_SECONDS,
            CacheCategory::Static => cache_ttl::STATIC_SECONDS,
        };
        Duration::from_secs(seconds)
    }
}

/// Snapshot of cache usage for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// Percentage of lookups that were hits, rounded
    pub hit_rate: u32,
    /// Percentage of lookups that were misses, rounded
    pub miss_rate: u32,
}

impl CacheStats {
    pub fn from_counts(size: usize, capacity: usize, hits: u64, misses: u64) -> Self {
        let total = hits + misses;
        let (hit_rate, miss_rate) = if total == 0 {
            (0, 0)
        } else {
            let hit_rate = ((hits as f64 / total as f64) * 100.0).round() as u32;
            let miss_rate = ((misses as f64 / total as f64) * 100.0).round() as u32;
            (hit_rate, miss_rate)
        };
        Self {
            size,
            capacity,
            hits,
            misses,
            hit_rate,
            miss_rate,
        }
    }
}
