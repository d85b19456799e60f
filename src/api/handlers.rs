//! API Handlers
//!
//! HTTP request handlers for each dashboard endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName},
    Json,
};
use tracing::{error, warn};

use crate::cache::QueryCache;
use crate::config::Config;
use crate::data::{DataSource, InMemoryDataSource};
use crate::error::{DashboardError, ListFailure, LookupFailure};
use crate::models::{HealthResponse, OrdersResponse, StatsResponse};
use crate::query::{CustomerPage, ListCustomersQuery, QueryService};

/// Cache guidance sent with every successful customer list.
pub const CUSTOMER_LIST_CACHE_CONTROL: &str = "s-maxage=60, stale-while-revalidate";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: QueryService,
    /// Size of the customer book, reported by the health check
    pub customer_count: usize,
    /// Whether internal error detail is returned to callers
    pub expose_error_detail: bool,
}

impl AppState {
    /// Creates state over `source` with error detail hidden.
    pub fn new(source: Arc<dyn DataSource>, cache: QueryCache) -> Self {
        let customer_count = source.list_all().map(|c| c.len()).unwrap_or_default();
        Self {
            service: QueryService::new(source, cache),
            customer_count,
            expose_error_detail: false,
        }
    }

    pub fn with_error_detail(mut self, expose: bool) -> Self {
        self.expose_error_detail = expose;
        self
    }

    /// Generates the mock dataset and cache from configuration.
    pub fn from_config(config: &Config) -> Self {
        let source = InMemoryDataSource::generate(config.customer_count);
        let cache = QueryCache::new(config.cache_max_entries, config.cache_ttl_ms);
        Self::new(Arc::new(source), cache)
            .with_error_detail(config.environment.exposes_error_detail())
    }
}

/// Handler for GET /api/customers
///
/// Paginated, sorted, searchable customer list. The query string is read as
/// plain pairs so a repeated or malformed parameter only affects itself.
pub async fn list_customers_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<([(HeaderName, &'static str); 1], Json<CustomerPage>), ListFailure> {
    let raw = ListCustomersQuery::from_pairs(pairs);
    let params = raw.normalize();

    match state.service.query(&params).await {
        Ok(page) => Ok((
            [(header::CACHE_CONTROL, CUSTOMER_LIST_CACHE_CONTROL)],
            Json(page),
        )),
        Err(e) => {
            error!(
                error = %e,
                page = ?raw.page,
                limit = ?raw.limit,
                sort_by = ?raw.sort_by,
                order = ?raw.order,
                search = ?raw.search,
                "customer list query failed"
            );
            Err(ListFailure::new(e, state.expose_error_detail))
        }
    }
}

/// Handler for GET /api/customers/:id/orders
pub async fn customer_orders_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrdersResponse>, LookupFailure> {
    match state.service.orders_for(&id) {
        Ok(orders) => Ok(Json(OrdersResponse::new(orders))),
        Err(e @ DashboardError::NotFound(_)) | Err(e @ DashboardError::InvalidRequest(_)) => {
            warn!(customer_id = %id, error = %e, "order lookup rejected");
            Err(e.into())
        }
        Err(e) => {
            error!(customer_id = %id, error = %e, "order lookup failed");
            Err(e.into())
        }
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let handle = state.service.cache();
    let cache = handle.read().await;
    Json(StatsResponse::new(&cache.stats(), cache.ttl_ms()))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.customer_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{fallback_customers, Customer};
    use crate::error::Result;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use chrono::Utc;

    struct OfflineSource;

    impl DataSource for OfflineSource {
        fn list_all(&self) -> Result<Arc<Vec<Customer>>> {
            Err(DashboardError::DataSource("connection refused".to_string()))
        }
    }

    fn test_state() -> AppState {
        let source = InMemoryDataSource::generate(25);
        AppState::new(Arc::new(source), QueryCache::new(100, 300_000))
    }

    fn query(pairs: &[(&str, &str)]) -> Query<Vec<(String, String)>> {
        Query(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_list_customers_handler() {
        let state = test_state();
        let (headers, Json(page)) = list_customers_handler(State(state), query(&[("limit", "10"), ("sortBy", "email")]))
            .await
            .unwrap();

        assert_eq!(headers[0].1, CUSTOMER_LIST_CACHE_CONTROL);
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.total, 25);
        assert!(page.has_more);
        assert!(page.data.windows(2).all(|w| w[0].email <= w[1].email));
    }

    #[tokio::test]
    async fn test_list_customers_without_query() {
        let (_, Json(page)) = list_customers_handler(State(test_state()), query(&[]))
            .await
            .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
    }

    #[tokio::test]
    async fn test_list_customers_repeated_key_keeps_other_params() {
        let state = test_state();
        let all = state.service.query(&Default::default()).await.unwrap();
        let needle = all.data[0].name.to_lowercase();
        let filtered = state
            .service
            .query(&ListCustomersQuery::from_pairs([("search", needle.as_str())]).normalize())
            .await
            .unwrap();

        let (_, Json(page)) = list_customers_handler(
            State(state),
            query(&[("search", needle.as_str()), ("page", "1"), ("page", "2")]),
        )
        .await
        .unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.total, filtered.total);
        assert!(page.total >= 1);
        assert!(page
            .data
            .iter()
            .all(|c| c.name.to_lowercase().contains(&needle)
                || c.email.to_lowercase().contains(&needle)));
    }

    #[tokio::test]
    async fn test_list_customers_source_failure() {
        let state = AppState::new(Arc::new(OfflineSource), QueryCache::new(10, 300_000));
        let failure = list_customers_handler(State(state), query(&[])).await.unwrap_err();

        assert!(!failure.expose_detail);
        assert_eq!(
            failure.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_customer_orders_handler() {
        let state = AppState::new(
            Arc::new(InMemoryDataSource::from_customers(fallback_customers(
                Utc::now(),
            ))),
            QueryCache::new(10, 300_000),
        );

        let Json(found) = customer_orders_handler(State(state.clone()), Path("fallback-1".into()))
            .await
            .unwrap();
        assert!(found.success);
        assert!(found.data.is_empty());

        let missing = customer_orders_handler(State(state), Path("nope".into()))
            .await
            .unwrap_err();
        assert_eq!(missing.error, DashboardError::NotFound("nope".into()));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();
        list_customers_handler(State(state.clone()), query(&[]))
            .await
            .unwrap();
        list_customers_handler(State(state.clone()), query(&[]))
            .await
            .unwrap();

        let Json(stats) = stats_handler(State(state)).await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(response) = health_handler(State(test_state())).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.customers, 25);
    }
}
