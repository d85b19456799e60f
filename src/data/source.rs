//! Data Source Module
//!
//! Read-only access to the process-lifetime customer collection.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::data::customer::Customer;
use crate::data::generator::{fallback_customers, generate_customers};
use crate::error::Result;

// == Data Source Trait ==
/// Supplier of the complete customer collection.
///
/// Implementations never filter or mutate; callers get the whole book in
/// insertion order.
pub trait DataSource: Send + Sync {
    /// Returns every customer, orders included.
    fn list_all(&self) -> Result<Arc<Vec<Customer>>>;

    /// Looks up a single customer by identifier.
    fn find(&self, id: &str) -> Result<Option<Customer>> {
        let customers = self.list_all()?;
        Ok(customers.iter().find(|c| c.id == id).cloned())
    }
}

// == In-Memory Data Source ==
/// Customer collection generated once and held for the life of the process.
#[derive(Debug, Clone)]
pub struct InMemoryDataSource {
    customers: Arc<Vec<Customer>>,
}

impl InMemoryDataSource {
    /// Wraps a fixed set of customers.
    pub fn from_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers: Arc::new(customers),
        }
    }

    /// Generates `count` mock customers.
    ///
    /// If generation fails the single fallback record is served instead, so
    /// the collection is never empty because of a generator error.
    pub fn generate(count: usize) -> Self {
        let now = Utc::now();
        match generate_customers(&mut rand::thread_rng(), count, now) {
            Ok(customers) => {
                info!("Generated {} mock customers", customers.len());
                Self::from_customers(customers)
            }
            Err(e) => {
                warn!(error = %e, "Mock data generation failed, serving fallback dataset");
                Self::from_customers(fallback_customers(now))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl DataSource for InMemoryDataSource {
    fn list_all(&self) -> Result<Arc<Vec<Customer>>> {
        Ok(Arc::clone(&self.customers))
    }
}
