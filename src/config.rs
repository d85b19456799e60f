//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::data::MAX_CUSTOMERS;

/// Default time-to-live for cached query results, in milliseconds.
pub const DEFAULT_CACHE_TTL_MS: u64 = 300_000;

/// Deployment environment, controls how much error detail reaches callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parses `APP_ENV`. Anything other than `development`/`dev` is production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn exposes_error_detail(self) -> bool {
        self == Environment::Development
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Age in milliseconds after which a cached query result is stale
    pub cache_ttl_ms: u64,
    /// Maximum number of distinct query keys kept in the cache
    pub cache_max_entries: usize,
    /// Number of mock customers generated at startup
    pub customer_count: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Deployment environment
    pub environment: Environment,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL_MS` - Query cache TTL in milliseconds (default: 300000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cached query keys (default: 1000)
    /// - `CUSTOMER_COUNT` - Mock customers to generate, 1 to 100 (default: 100)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `APP_ENV` - `development` or `production` (default: production)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    // == From Lookup ==
    /// Builds a config from any variable source. Unset or unparsable values
    /// take their defaults; `CUSTOMER_COUNT` is clamped into range.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let requested = parse_or(lookup("CUSTOMER_COUNT"), defaults.customer_count);
        let customer_count = requested.clamp(1, MAX_CUSTOMERS);
        if customer_count != requested {
            warn!(
                requested,
                using = customer_count,
                "CUSTOMER_COUNT out of range, clamping"
            );
        }

        Self {
            server_port: parse_or(lookup("SERVER_PORT"), defaults.server_port),
            cache_ttl_ms: parse_or(lookup("CACHE_TTL_MS"), defaults.cache_ttl_ms),
            cache_max_entries: parse_or(lookup("CACHE_MAX_ENTRIES"), defaults.cache_max_entries),
            customer_count,
            cleanup_interval: parse_or(lookup("CLEANUP_INTERVAL"), defaults.cleanup_interval),
            environment: lookup("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or(defaults.environment),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            cache_max_entries: 1000,
            customer_count: 100,
            cleanup_interval: 60,
            environment: Environment::Production,
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
