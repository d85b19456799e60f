//! Query Module
//!
//! Parameter normalization, the filter/sort/paginate engine and the cached
//! query service behind `GET /api/customers`.

pub mod engine;
pub mod params;
pub mod service;


pub use engine::{filter_customers, paginate, sort_customers, CustomerPage};
pub use params::{
    ListCustomersQuery, QueryKey, QueryParams, SortField, SortOrder, DEFAULT_LIMIT, DEFAULT_PAGE,
    MAX_LIMIT,
};
pub use service::QueryService;
