//! Cache Entry Module
//!
//! A cached result set together with the time it was computed.

use std::sync::Arc;

use crate::data::Customer;

// == Cached Result ==
/// Filtered and sorted customers for one query key.
#[derive(Debug, Clone)]
pub struct CachedResult {
    /// The full result set, not a single page
    pub customers: Arc<Vec<Customer>>,
    /// When the result was stored (Unix milliseconds)
    pub stored_at: u64,
}

impl CachedResult {
    pub fn new(customers: Arc<Vec<Customer>>, stored_at: u64) -> Self {
        Self {
            customers,
            stored_at,
        }
    }

    /// Milliseconds since the entry was stored. A clock that went backwards
    /// reads as age 0.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.stored_at)
    }

    // == Is Fresh ==
    /// An entry is fresh while its age is strictly below the TTL; once the TTL
    /// has fully elapsed it is stale.
    pub fn is_fresh(&self, now: u64, ttl_ms: u64) -> bool {
        self.age_ms(now) < ttl_ms
    }
}
