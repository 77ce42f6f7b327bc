//! Time-expiring store for model-list payloads.

use super::clock::{Clock, SystemClock};
use super::key::CacheKey;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Entries are served for one day after insertion.
pub const DISCOVERY_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

static GLOBAL_CACHE: Lazy<Arc<DiscoveryCache>> = Lazy::new(|| Arc::new(DiscoveryCache::new()));

#[derive(Clone)]
struct CacheEntry {
    payload: Arc<Value>,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) > ttl
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
}

#[derive(Default)]
struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
}

impl AtomicStats {
    fn to_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
        }
    }
}

/// Credential-scoped cache of raw model-list responses.
///
/// Expiry is checked lazily on read. Entries are immutable once written, so a
/// reader never observes a partially written payload; two concurrent misses for
/// the same key both insert and the last write wins.
pub struct DiscoveryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    stats: AtomicStats,
}

impl DiscoveryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: DISCOVERY_CACHE_TTL,
            clock,
            stats: AtomicStats::default(),
        }
    }

    /// Process-wide instance shared by connectors built with defaults.
    pub fn global() -> Arc<DiscoveryCache> {
        GLOBAL_CACHE.clone()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<Value>> {
        let now = self.clock.now();
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        match entries.get(key.as_str()) {
            Some(entry) if !entry.is_expired(now, self.ttl) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.payload.clone())
            }
            _ => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: &CacheKey, payload: Value) -> Arc<Value> {
        let now = self.clock.now();
        let payload = Arc::new(payload);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let ttl = self.ttl;
        entries.retain(|_, e| !e.is_expired(now, ttl));
        entries.insert(
            key.as_str().to_string(),
            CacheEntry {
                payload: payload.clone(),
                inserted_at: now,
            },
        );
        self.stats.inserts.fetch_add(1, Ordering::Relaxed);
        payload
    }

    /// Number of live (non-expired) entries.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|e| !e.is_expired(now, self.ttl))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.to_stats()
    }
}

impl Default for DiscoveryCache {
    fn default() -> Self {
        Self::new()
    }
}
