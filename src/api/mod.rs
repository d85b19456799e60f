//! API Module
//!
//! HTTP handlers and routing for the dashboard REST API.
//!
//! # Endpoints
//! - `GET /api/customers` - Customer list with search, sort and paging
//! - `GET /api/customers/:id/orders` - Order detail for one customer
//! - `GET /stats` - Query cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
