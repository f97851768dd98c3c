//! Built-in sample catalog used when the catalog API is unreachable.
//!
//! Keeps the storefront browsable offline. Entries mirror the categories the
//! live API serves so the category filter stays meaningful.

use rust_decimal::Decimal;
use shopease_core::{Price, ProductId, Rating};

use super::types::Product;

const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.svg";

fn product(
    id: i64,
    title: &str,
    cents: i64,
    category: &str,
    description: &str,
    rate: f64,
    count: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::new(Decimal::new(cents, 2)),
        description: description.to_string(),
        category: category.to_string(),
        image: PLACEHOLDER_IMAGE.to_string(),
        rating: Some(Rating::new(rate, count)),
    }
}

/// The offline fallback catalog.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    vec![
        product(
            1,
            "Premium Wireless Headphones",
            29_99,
            "electronics",
            "Over-ear wireless headphones with 30-hour battery life.",
            4.5,
            150,
        ),
        product(
            2,
            "Classic Cotton T-Shirt",
            15_99,
            "men's clothing",
            "Everyday crew-neck tee in combed cotton.",
            4.2,
            89,
        ),
        product(
            3,
            "Diamond Pendant Necklace",
            89_99,
            "jewelery",
            "Solitaire pendant on an 18-inch chain.",
            4.8,
            67,
        ),
        product(
            4,
            "Elegant Summer Dress",
            45_99,
            "women's clothing",
            "Lightweight midi dress with a floral print.",
            4.6,
            124,
        ),
        product(
            5,
            "Smart Fitness Watch",
            199_99,
            "electronics",
            "Heart-rate tracking, GPS, and a week of battery.",
            4.7,
            203,
        ),
        product(
            6,
            "Gold Chain Bracelet",
            129_99,
            "jewelery",
            "14k gold-plated curb chain bracelet.",
            4.4,
            78,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_has_six_distinct_products() {
        let products = sample_products();
        assert_eq!(products.len(), 6);

        let mut ids: Vec<i64> = products.iter().map(|p| p.id.as_i64()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_sample_catalog_covers_multiple_categories() {
        let products = sample_products();
        let mut categories: Vec<&str> = products.iter().map(|p| p.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        assert!(categories.len() >= 3);
    }
}
