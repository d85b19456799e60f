//! Mock Data Generator
//!
//! Builds the fake customer book the dashboard serves. Amounts are computed in
//! integer cents so order totals and customer revenue add up exactly.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::Rng;
use uuid::Builder;

use crate::data::customer::{
    CustomSize, Customer, CustomerStatus, ItemCategory, Order, OrderItem,
};
use crate::error::{DashboardError, Result};

/// Upper bound on the generated dataset.
pub const MAX_CUSTOMERS: usize = 100;

const FIRST_NAMES: &[&str] = &[
    "Olivia", "Liam", "Emma", "Noah", "Amelia", "Oliver", "Sophia", "Elijah", "Isabella",
    "James", "Mia", "William", "Charlotte", "Lucas", "Harper", "Henry", "Evelyn", "John",
    "Abigail", "Theodore", "Emily", "Jack", "Ella", "Benjamin", "Grace",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore",
    "Jackson", "Martin", "Lee", "Thompson", "White", "Harris", "Clark", "Lewis",
];

const EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

const ADJECTIVES: &[&str] = &[
    "Elegant", "Refined", "Classic", "Tailored", "Handcrafted", "Modern", "Sleek", "Luxurious",
];

const MATERIALS: &[&str] = &["Wool", "Linen", "Cotton", "Silk", "Tweed", "Cashmere", "Velvet"];

const GARMENTS: &[&str] = &[
    "Blazer", "Trousers", "Waistcoat", "Shirt", "Dress", "Overcoat", "Suit", "Skirt",
];

// == Generate Customers ==
/// Generates `count` customers with their orders, dated relative to `now`.
///
/// Fails when `count` is zero or above [`MAX_CUSTOMERS`].
pub fn generate_customers<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Result<Vec<Customer>> {
    if count == 0 || count > MAX_CUSTOMERS {
        return Err(DashboardError::Generation(format!(
            "customer count must be between 1 and {}, got {}",
            MAX_CUSTOMERS, count
        )));
    }

    let now = now.trunc_subsecs(0);
    Ok((0..count).map(|_| generate_customer(rng, now)).collect())
}

fn generate_customer<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Customer {
    let id = random_id(rng);
    let order_count: u32 = rng.gen_range(0..=10);
    let orders: Vec<Order> = (0..order_count)
        .map(|_| generate_order(rng, &id, now))
        .collect();

    let revenue_cents: u64 = orders.iter().map(|o| to_cents(o.total_amount)).sum();
    let last_order_date = orders.iter().map(|o| o.order_date).max();

    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let email = format!(
        "{}.{}{}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        rng.gen_range(1..100),
        pick(rng, EMAIL_DOMAINS)
    );

    Customer {
        id,
        name: format!("{} {}", first, last),
        email,
        status: *pick(rng, &CustomerStatus::ALL),
        revenue: from_cents(revenue_cents),
        created_at: now - Duration::days(rng.gen_range(365..=730)),
        order_count,
        last_order_date,
        orders,
    }
}

fn generate_order<R: Rng + ?Sized>(rng: &mut R, customer_id: &str, now: DateTime<Utc>) -> Order {
    let item_count = rng.gen_range(1..=5);
    let items: Vec<OrderItem> = (0..item_count).map(|_| generate_item(rng)).collect();
    let total_cents: u64 = items.iter().map(|i| to_cents(i.price)).sum();

    Order {
        order_id: random_id(rng),
        customer_id: customer_id.to_string(),
        order_date: now - Duration::days(rng.gen_range(1..=365)),
        total_amount: from_cents(total_cents),
        items,
    }
}

fn generate_item<R: Rng + ?Sized>(rng: &mut R) -> OrderItem {
    let product = format!(
        "{} {} {}",
        pick(rng, ADJECTIVES),
        pick(rng, MATERIALS),
        pick(rng, GARMENTS)
    );

    OrderItem {
        order_item_id: random_id(rng),
        item_name: format!("Bespoke {}", product),
        category: *pick(rng, &ItemCategory::ALL),
        price: from_cents(rng.gen_range(10_000..=100_000)),
        custom_size: CustomSize {
            chest: rng.gen_range(30..=50),
            waist: rng.gen_range(28..=48),
            hips: rng.gen_range(30..=50),
        },
    }
}

// == Fallback ==
/// The single record served when generation fails at startup.
pub fn fallback_customers(now: DateTime<Utc>) -> Vec<Customer> {
    vec![Customer {
        id: "fallback-1".to_string(),
        name: "Sample Customer".to_string(),
        email: "sample@example.com".to_string(),
        status: CustomerStatus::Active,
        revenue: 0.0,
        created_at: now.trunc_subsecs(0),
        order_count: 0,
        last_order_date: None,
        orders: Vec::new(),
    }]
}

// == Utility Functions ==
fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    Builder::from_random_bytes(rng.gen()).into_uuid().to_string()
}

fn pick<'a, R: Rng + ?Sized, T>(rng: &mut R, items: &'a [T]) -> &'a T {
    // All pick tables are non-empty constants
    &items[rng.gen_range(0..items.len())]
}

fn to_cents(amount: f64) -> u64 {
    (amount * 100.0).round() as u64
}

fn from_cents(cents: u64) -> f64 {
    cents as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn generate(count: usize) -> Vec<Customer> {
        let mut rng = StdRng::seed_from_u64(42);
        generate_customers(&mut rng, count, Utc::now()).unwrap()
    }

    #[test]
    fn test_generates_requested_count() {
        assert_eq!(generate(100).len(), 100);
        assert_eq!(generate(1).len(), 1);
    }

    #[test]
    fn test_rejects_out_of_range_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate_customers(&mut rng, 0, Utc::now()),
            Err(DashboardError::Generation(_))
        ));
        assert!(matches!(
            generate_customers(&mut rng, MAX_CUSTOMERS + 1, Utc::now()),
            Err(DashboardError::Generation(_))
        ));
    }

    #[test]
    fn test_same_seed_same_data() {
        let now = Utc::now();
        let a = generate_customers(&mut StdRng::seed_from_u64(7), 20, now).unwrap();
        let b = generate_customers(&mut StdRng::seed_from_u64(7), 20, now).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ids_are_unique() {
        let customers = generate(100);
        let customer_ids: HashSet<_> = customers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(customer_ids.len(), customers.len());

        let orders: Vec<&Order> = customers.iter().flat_map(|c| &c.orders).collect();
        let order_ids: HashSet<_> = orders.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(order_ids.len(), orders.len());
    }

    #[test]
    fn test_amount_invariants() {
        for customer in generate(100) {
            assert_eq!(customer.order_count as usize, customer.orders.len());
            assert!(customer.orders.len() <= 10);

            let revenue: f64 = customer.orders.iter().map(|o| o.total_amount).sum();
            assert!((customer.revenue - revenue).abs() < 0.005);

            for order in &customer.orders {
                assert_eq!(order.customer_id, customer.id);
                assert!((1..=5).contains(&order.items.len()));
                let total: f64 = order.items.iter().map(|i| i.price).sum();
                assert!((order.total_amount - total).abs() < 0.005);
                for item in &order.items {
                    assert!((100.0..=1000.0).contains(&item.price));
                    assert!(item.item_name.starts_with("Bespoke "));
                }
            }
        }
    }

    #[test]
    fn test_dates_and_last_order() {
        let now = Utc::now().trunc_subsecs(0);
        let customers = generate_customers(&mut StdRng::seed_from_u64(3), 50, now).unwrap();
        for customer in customers {
            let age = now - customer.created_at;
            assert!(age >= Duration::days(365) && age <= Duration::days(730));

            match customer.orders.iter().map(|o| o.order_date).max() {
                Some(latest) => assert_eq!(customer.last_order_date, Some(latest)),
                None => assert!(customer.last_order_date.is_none()),
            }
        }
    }

    #[test]
    fn test_fallback_record() {
        let fallback = fallback_customers(Utc::now());
        assert_eq!(fallback.len(), 1);
        assert_eq!(fallback[0].id, "fallback-1");
        assert_eq!(fallback[0].email, "sample@example.com");
        assert!(fallback[0].orders.is_empty());
    }
}
