//! Response models for the dashboard API
//!
//! DTOs serialized into HTTP response bodies. The customer list body is
//! [`crate::query::CustomerPage`].

pub mod responses;

pub use responses::{HealthResponse, OrdersResponse, StatsResponse};
