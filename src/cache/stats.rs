//! Cache Statistics Module
//!
//! Hit, miss, expiration and eviction counters for the query cache.

use serde::Serialize;

// == Cache Stats ==
/// Counters describing how well the query cache is doing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a fresh entry
    pub hits: u64,
    /// Lookups that had to recompute (absent or stale)
    pub misses: u64,
    /// Stale entries dropped on lookup or by the cleanup task
    pub expirations: u64,
    /// Entries dropped to stay within capacity
    pub evictions: u64,
    /// Current number of cached result sets
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates stats with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Counts a lookup served from a fresh entry.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Counts a lookup that found nothing usable.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Expirations ==
    /// Adds `count` stale entries to the expiration counter.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Record Eviction ==
    /// Counts an entry dropped for capacity.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Entry Count ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
