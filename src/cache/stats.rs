//! Cache Statistics Module
//!
//! Tracks cache lookups and reports size, hits, misses, and hit rate.

use serde::Serialize;

// == Cache Counters ==
/// Monotonic hit/miss counters owned by the store.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
}

impl CacheCounters {
    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }
}

// == Cache Stats ==
/// Point-in-time snapshot of cache performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of entries, expired ones included until swept
    pub size: usize,
    /// Number of lookups that returned a live entry
    pub hits: u64,
    /// Number of lookups that found nothing or an expired entry
    pub misses: u64,
    /// Hit percentage rounded to one decimal place
    pub hit_rate: f64,
}

impl CacheStats {
    // == Constructor ==
    /// Builds a snapshot, deriving the hit rate from the counters.
    pub fn new(size: usize, hits: u64, misses: u64) -> Self {
        Self {
            size,
            hits,
            misses,
            hit_rate: hit_rate_percent(hits, misses),
        }
    }
}

// == Hit Rate ==
/// Returns `hits / (hits + misses) * 100` rounded to one decimal,
/// or 0.0 if no lookups have been made.
pub fn hit_rate_percent(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        (hits as f64 / total as f64 * 1000.0).round() / 10.0
    }
}
