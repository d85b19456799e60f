//! Filter, sort and paginate over the customer book.

use std::cmp::Ordering;

use serde::Serialize;

use crate::data::{Customer, CustomerSummary};
use crate::query::params::{SortField, SortOrder};

/// One page of the customer list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPage {
    pub data: Vec<CustomerSummary>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// Keeps customers whose name or email contains `needle` (already lowercased).
pub fn filter_customers(customers: &[Customer], needle: &str) -> Vec<Customer> {
    customers
        .iter()
        .filter(|c| c.matches_search(needle))
        .cloned()
        .collect()
}

/// Stable sort by `field` in `order`. Ties keep their relative order in both
/// directions.
pub fn sort_customers(customers: &mut [Customer], field: SortField, order: SortOrder) {
    customers.sort_by(|a, b| {
        let ordering = compare_by(a, b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &Customer, b: &Customer, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Status => a.status.cmp(&b.status),
        SortField::Revenue => a.revenue.total_cmp(&b.revenue),
        SortField::OrderCount => a.order_count.cmp(&b.order_count),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// Slices page `page` of size `limit` out of `sorted` and strips the orders.
pub fn paginate(sorted: &[Customer], page: usize, limit: usize) -> CustomerPage {
    let total = sorted.len();
    let start = page.saturating_sub(1).saturating_mul(limit);
    let end = start.saturating_add(limit);

    let data = sorted
        .get(start.min(total)..end.min(total))
        .unwrap_or_default()
        .iter()
        .map(CustomerSummary::from)
        .collect();

    CustomerPage {
        data,
        total,
        page,
        limit,
        has_more: end < total,
    }
}
