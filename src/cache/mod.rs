//! Cache Module
//!
//! Time-limited cache of filtered and sorted customer result sets.

mod clock;
mod entry;
mod lru;
mod stats;
mod store;

pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CachedResult;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::QueryCache;
