//! Cache Store Module
//!
//! Unsynchronized cache engine: HashMap storage with TTL expiration and
//! hit/miss accounting. [`TtlCache`](super::TtlCache) wraps it in a lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

use crate::cache::stats::CacheCounters;
use crate::cache::{CacheEntry, CacheKey, CacheStats};

// == Cache Store ==
/// Key-value storage with TTL support and a soft size bound.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry>,
    /// Lookup counters
    counters: CacheCounters,
    /// Entry count at which inserts trigger an expired-entry sweep
    max_entries: usize,
    /// TTL for entries stored without an explicit TTL
    default_ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given soft bound and default TTL.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            counters: CacheCounters::default(),
            max_entries,
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a value, replacing any previous entry under the same key.
    ///
    /// When the store is at or above its bound, expired entries are swept
    /// first. Live entries are never evicted, so the store may end up above
    /// its bound.
    pub fn set(&mut self, key: CacheKey, value: Value, ttl: Option<Duration>) {
        if self.entries.len() >= self.max_entries {
            let removed = self.cleanup_expired();
            if self.entries.len() >= self.max_entries {
                debug!(
                    removed,
                    size = self.entries.len(),
                    max = self.max_entries,
                    "cache at capacity with no expired entries left to sweep"
                );
            }
        }

        let ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &CacheKey) -> Option<Value> {
        let expired = match self.entries.get(key) {
            None => {
                self.counters.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.entries.remove(key);
            self.counters.record_miss();
            return None;
        }

        self.counters.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Remove ==
    /// Removes an entry, returning whether it was present.
    pub fn remove(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes every entry, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats::new(self.entries.len(), self.counters.hits, self.counters.misses)
    }

    // == Accessors ==
    /// Soft bound on the number of entries.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// TTL applied when none is given.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
