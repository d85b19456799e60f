//! Query Service
//!
//! Answers customer list queries from the data source, reusing cached result
//! sets while they are fresh.
//!
//! Concurrent misses on the same key both recompute and the last `put` wins.
//! Recomputation is deterministic over an immutable data source, so either
//! result is correct.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, QueryCache};
use crate::data::{Customer, DataSource, Order};
use crate::error::{DashboardError, Result};
use crate::query::engine::{filter_customers, paginate, sort_customers, CustomerPage};
use crate::query::params::QueryParams;

// == Query Service ==
#[derive(Clone)]
pub struct QueryService {
    source: Arc<dyn DataSource>,
    cache: Arc<RwLock<QueryCache>>,
}

impl QueryService {
    pub fn new(source: Arc<dyn DataSource>, cache: QueryCache) -> Self {
        Self {
            source,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Shared handle to the cache, for the background cleanup task.
    pub fn cache(&self) -> Arc<RwLock<QueryCache>> {
        Arc::clone(&self.cache)
    }

    // == Query ==
    /// Returns one page of customers matching `params`.
    ///
    /// The full filtered and sorted set is cached per query key; paging is
    /// applied afterwards so every page of a key shares one cache entry.
    pub async fn query(&self, params: &QueryParams) -> Result<CustomerPage> {
        let key = params.cache_key();

        // Write lock: a lookup updates stats and recency
        let cached = self.cache.write().await.get(&key);

        let sorted = match cached {
            Some(customers) => {
                debug!(key = %key, "query cache hit");
                customers
            }
            None => {
                debug!(key = %key, "query cache miss, recomputing");
                let computed = Arc::new(self.compute(params)?);
                self.cache.write().await.put(key, Arc::clone(&computed));
                computed
            }
        };

        Ok(paginate(&sorted, params.page, params.limit))
    }

    fn compute(&self, params: &QueryParams) -> Result<Vec<Customer>> {
        let all = self.source.list_all()?;
        let mut filtered = filter_customers(&all, &params.search);
        sort_customers(&mut filtered, params.sort_field, params.sort_order);
        Ok(filtered)
    }

    // == Orders For ==
    /// Returns the full order list of customer `id`.
    pub fn orders_for(&self, id: &str) -> Result<Vec<Order>> {
        let id = id.trim();
        if id.is_empty() {
            return Err(DashboardError::InvalidRequest(
                "Customer ID is required".to_string(),
            ));
        }

        self.source
            .find(id)?
            .map(|customer| customer.orders)
            .ok_or_else(|| DashboardError::NotFound(id.to_string()))
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::data::{fallback_customers, CustomerStatus, InMemoryDataSource};
    use crate::query::params::ListCustomersQuery;
    use chrono::Utc;
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: u64 = 300_000;

    /// Counts how often the full collection is read.
    #[derive(Debug)]
    struct CountingSource {
        inner: InMemoryDataSource,
        reads: AtomicUsize,
    }

    impl DataSource for CountingSource {
        fn list_all(&self) -> Result<Arc<Vec<Customer>>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.list_all()
        }
    }

    struct BrokenSource;

    impl DataSource for BrokenSource {
        fn list_all(&self) -> Result<Arc<Vec<Customer>>> {
            Err(DashboardError::DataSource("store offline".to_string()))
        }
    }

    fn named(id: &str, name: &str, revenue: f64) -> Customer {
        let mut customer = fallback_customers(Utc::now()).remove(0);
        customer.id = id.to_string();
        customer.name = name.to_string();
        customer.email = format!("{}@example.com", name.to_lowercase());
        customer.status = CustomerStatus::Active;
        customer.revenue = revenue;
        customer
    }

    fn trio() -> Vec<Customer> {
        vec![
            named("1", "Alice", 100.0),
            named("2", "Bob", 50.0),
            named("3", "Carol", 200.0),
        ]
    }

    fn counting_service(
        customers: Vec<Customer>,
    ) -> (QueryService, Arc<CountingSource>, Arc<ManualClock>) {
        let source = Arc::new(CountingSource {
            inner: InMemoryDataSource::from_customers(customers),
            reads: AtomicUsize::new(0),
        });
        let clock = Arc::new(ManualClock::new(0));
        let cache = QueryCache::with_clock(100, TTL, clock.clone());
        let service = QueryService::new(source.clone(), cache);
        (service, source, clock)
    }

    fn params(page: &str, limit: &str, sort_by: &str, order: &str, search: &str) -> QueryParams {
        ListCustomersQuery {
            page: Some(page.to_string()),
            limit: Some(limit.to_string()),
            sort_by: Some(sort_by.to_string()),
            order: Some(order.to_string()),
            search: Some(search.to_string()),
        }
        .normalize()
    }

    fn page_names(page: &CustomerPage) -> Vec<&str> {
        page.data.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_revenue_ascending_first_page() {
        let (service, _, _) = counting_service(trio());
        let page = service
            .query(&params("1", "2", "revenue", "asc", ""))
            .await
            .unwrap();

        assert_eq!(page_names(&page), vec!["Bob", "Alice"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 2);
        assert!(page.has_more);
    }

    #[tokio::test]
    async fn test_pages_share_one_computation() {
        let (service, source, _) = counting_service(trio());

        let first = service
            .query(&params("1", "2", "name", "asc", ""))
            .await
            .unwrap();
        let second = service
            .query(&params("2", "2", "name", "asc", ""))
            .await
            .unwrap();

        assert_eq!(source.reads.load(Ordering::SeqCst), 1);
        assert_eq!(first.total, second.total);
        assert_eq!(page_names(&first), vec!["Alice", "Bob"]);
        assert_eq!(page_names(&second), vec!["Carol"]);
        assert!(!second.has_more);
    }

    #[tokio::test]
    async fn test_expiry_recomputes_identical_result() {
        let (service, source, clock) = counting_service(trio());
        let query = params("1", "10", "revenue", "desc", "");

        let before = service.query(&query).await.unwrap();
        clock.advance(TTL);
        let after = service.query(&query).await.unwrap();

        assert_eq!(source.reads.load(Ordering::SeqCst), 2);
        assert_eq!(before, after);
        assert_eq!(service.cache_stats().await.expirations, 1);
    }

    #[tokio::test]
    async fn test_search_narrows_total() {
        let (service, _, _) = counting_service(trio());
        let page = service
            .query(&params("1", "10", "name", "asc", "  CAROL "))
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page_names(&page), vec!["Carol"]);
    }

    #[tokio::test]
    async fn test_search_without_match_is_empty_not_error() {
        let (service, _, _) = counting_service(trio());
        let page = service
            .query(&params("1", "10", "name", "asc", "zed"))
            .await
            .unwrap();

        assert_eq!(page.total, 0);
        assert!(page.data.is_empty());
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_invalid_sort_matches_default() {
        let (service, _, _) = counting_service(trio());
        let fallback = service
            .query(&params("1", "10", "foo", "xyz", ""))
            .await
            .unwrap();
        let explicit = service
            .query(&params("1", "10", "name", "asc", ""))
            .await
            .unwrap();

        assert_eq!(fallback, explicit);
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        let service = QueryService::new(Arc::new(BrokenSource), QueryCache::new(10, TTL));
        let result = service.query(&QueryParams::default()).await;
        assert!(matches!(result, Err(DashboardError::DataSource(_))));
        assert_eq!(service.cache_stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_orders_for_known_unknown_and_blank() {
        let mut customers = trio();
        let generated =
            crate::data::generate_customers(&mut StdRng::seed_from_u64(9), 5, Utc::now()).unwrap();
        customers[1].orders = generated.into_iter().flat_map(|c| c.orders).collect();
        let expected = customers[1].orders.clone();
        let (service, _, _) = counting_service(customers);

        assert_eq!(service.orders_for("2").unwrap(), expected);
        assert!(matches!(
            service.orders_for("missing"),
            Err(DashboardError::NotFound(_))
        ));
        assert!(matches!(
            service.orders_for("  "),
            Err(DashboardError::InvalidRequest(_))
        ));
    }
}
