//! Async TTL Cache
//!
//! Shared, lock-protected front end over [`CacheStore`] keyed by
//! `(endpoint, params)`.

use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheKey, CacheStats, CacheStore};
use crate::client::Params;

// == TTL Cache ==
/// Async-safe TTL cache for API responses.
///
/// Every operation runs under a single mutex, including the
/// sweep-then-insert sequence in [`TtlCache::set`].
#[derive(Debug)]
pub struct TtlCache {
    store: Mutex<CacheStore>,
    max_entries: usize,
    default_ttl: Duration,
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            store: Mutex::new(CacheStore::new(max_entries, default_ttl)),
            max_entries,
            default_ttl,
        }
    }

    // == Get ==
    /// Returns the live value for `(endpoint, params)`, or None on a miss.
    pub async fn get(&self, endpoint: &str, params: &Params) -> Option<Value> {
        let key = CacheKey::derive(endpoint, params);
        let value = self.store.lock().await.get(&key);
        debug!(endpoint, hit = value.is_some(), "cache lookup");
        value
    }

    // == Set ==
    /// Stores `value` under `(endpoint, params)`; `None` uses the default TTL.
    pub async fn set(&self, endpoint: &str, params: &Params, value: Value, ttl: Option<Duration>) {
        let key = CacheKey::derive(endpoint, params);
        self.store.lock().await.set(key, value, ttl);
    }

    // == Invalidate ==
    /// Removes one entry, returning whether it was present.
    pub async fn invalidate(&self, endpoint: &str, params: &Params) -> bool {
        let key = CacheKey::derive(endpoint, params);
        self.store.lock().await.remove(&key)
    }

    // == Clear ==
    /// Removes every entry, returning how many were removed.
    pub async fn clear(&self) -> usize {
        self.store.lock().await.clear()
    }

    // == Cleanup Expired ==
    /// Sweeps expired entries, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.lock().await.cleanup_expired()
    }

    // == Stats ==
    /// Snapshot of size and lookup counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    /// Soft bound on the number of entries.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// TTL applied when none is given.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
