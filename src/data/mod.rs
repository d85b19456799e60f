//! Data Module
//!
//! Customer records, the mock data generator and the read-only data source.

pub mod customer;
pub mod generator;
pub mod source;

pub use customer::{
    CustomSize, Customer, CustomerStatus, CustomerSummary, ItemCategory, Order, OrderItem,
};
pub use generator::{fallback_customers, generate_customers, MAX_CUSTOMERS};
pub use source::{DataSource, InMemoryDataSource};
