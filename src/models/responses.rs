//! Response DTOs for the dashboard API

use serde::Serialize;

use crate::cache::CacheStats;
use crate::data::Order;

/// Success body of `GET /api/customers/:id/orders`.
#[derive(Debug, Clone, Serialize)]
pub struct OrdersResponse {
    /// Always `true`; failures use the error envelope
    pub success: bool,
    /// The customer's orders, exactly as stored
    pub data: Vec<Order>,
}

impl OrdersResponse {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            success: true,
            data: orders,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    /// Result sets currently cached
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    pub ttl_ms: u64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, ttl_ms: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            ttl_ms,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Number of customers being served
    pub customers: usize,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(customers: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            customers,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
