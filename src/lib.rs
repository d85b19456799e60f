//! Customer Dashboard - customer list and order detail API
//!
//! Serves a searchable, sortable, paginated view over an in-memory customer
//! book, caching filtered result sets for a short time-to-live.

pub mod api;
pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod query;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
