//! Query Cache Store
//!
//! Holds filtered and sorted result sets keyed by (search, sort field, sort
//! order), expiring them after a fixed time-to-live.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheStats, CachedResult, Clock, LruTracker, SystemClock};
use crate::data::Customer;
use crate::query::QueryKey;

// == Query Cache ==
/// Result-set cache with TTL expiry and LRU capacity bound.
#[derive(Debug)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CachedResult>,
    lru: LruTracker<QueryKey>,
    stats: CacheStats,
    /// Maximum number of distinct keys held
    max_entries: usize,
    /// Age at which an entry becomes stale
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
}

impl QueryCache {
    // == Constructor ==
    /// Creates a cache on the system clock.
    pub fn new(max_entries: usize, ttl_ms: u64) -> Self {
        Self::with_clock(max_entries, ttl_ms, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`. Capacity is at least one.
    pub fn with_clock(max_entries: usize, ttl_ms: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            ttl_ms,
            clock,
        }
    }

    // == Get ==
    /// Returns the cached result set for `key` if it is still fresh.
    ///
    /// A stale entry is removed and counted as an expiration and a miss.
    pub fn get(&mut self, key: &QueryKey) -> Option<Arc<Vec<Customer>>> {
        let now = self.clock.now_ms();

        let fresh = match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now, self.ttl_ms) => Some(Arc::clone(&entry.customers)),
            Some(_) => {
                self.entries.remove(key);
                self.lru.remove(key);
                self.stats.record_expirations(1);
                self.stats.set_total_entries(self.entries.len());
                None
            }
            None => None,
        };

        match fresh {
            Some(customers) => {
                self.stats.record_hit();
                self.lru.touch(key);
                Some(customers)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores `customers` under `key`, replacing any previous entry for it.
    ///
    /// A new key arriving at capacity evicts the least recently used one.
    pub fn put(&mut self, key: QueryKey, customers: Arc<Vec<Customer>>) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        let entry = CachedResult::new(customers, self.clock.now_ms());
        self.lru.touch(&key);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Cleanup Expired ==
    /// Removes every stale entry and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms;
        let expired: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(now, ttl_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expirations(expired.len());
        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    // == Stats ==
    /// Snapshot of the counters with the current entry count.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    // == Length ==
    /// Number of cached result sets, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
