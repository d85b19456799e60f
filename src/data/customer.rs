//! Customer Records
//!
//! Domain records served by the dashboard: customers, their orders and the
//! bespoke items inside each order.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Customer Status ==
/// Lifecycle status of a customer.
///
/// Variant order is alphabetical so the derived `Ord` sorts the same way the
/// serialized names do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Churned,
    Prospect,
}

impl CustomerStatus {
    pub const ALL: [CustomerStatus; 3] = [
        CustomerStatus::Active,
        CustomerStatus::Churned,
        CustomerStatus::Prospect,
    ];
}

// == Item Category ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemCategory {
    Jackets,
    Trousers,
    Dresses,
    Shirts,
    Suits,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 5] = [
        ItemCategory::Jackets,
        ItemCategory::Trousers,
        ItemCategory::Dresses,
        ItemCategory::Shirts,
        ItemCategory::Suits,
    ];
}

/// Body measurements for a made-to-measure item, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomSize {
    pub chest: u32,
    pub waist: u32,
    pub hips: u32,
}

/// One purchased good within an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order_item_id: String,
    pub item_name: String,
    pub category: ItemCategory,
    pub price: f64,
    pub custom_size: CustomSize,
}

/// A purchase belonging to one customer.
///
/// `total_amount` is the sum of the item prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub order_date: DateTime<Utc>,
    pub total_amount: f64,
    pub items: Vec<OrderItem>,
}

// == Customer ==
/// A tracked client with its full order history.
///
/// `revenue` is the sum of the order totals at generation time and is never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: CustomerStatus,
    pub revenue: f64,
    pub created_at: DateTime<Utc>,
    pub order_count: u32,
    pub last_order_date: Option<DateTime<Utc>>,
    pub orders: Vec<Order>,
}

impl Customer {
    /// Case-insensitive substring match on name or email.
    ///
    /// `needle` must already be lowercased. An empty needle matches everything.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

// == Customer Summary ==
/// A customer as it appears in list responses: everything but the orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: CustomerStatus,
    pub revenue: f64,
    pub created_at: DateTime<Utc>,
    pub order_count: u32,
    pub last_order_date: Option<DateTime<Utc>>,
}

impl From<&Customer> for CustomerSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            status: customer.status,
            revenue: customer.revenue,
            created_at: customer.created_at,
            order_count: customer.order_count,
            last_order_date: customer.last_order_date,
        }
    }
}
