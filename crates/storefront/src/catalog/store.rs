//! In-memory merged catalog.
//!
//! The home page fetches a bounded "featured" slice and the products page
//! fetches the full list; both land here so cart and wishlist lookups see one
//! collection. Merging deduplicates by product id: a refetched product
//! replaces the stale entry in place, new products append, so relative order
//! stays stable.

use shopease_core::ProductId;

use super::types::Product;

/// The merged set of products known to this session.
#[derive(Debug, Default, Clone)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    /// Merge fetched products into the catalog, deduplicating by id.
    pub fn merge(&mut self, incoming: Vec<Product>) {
        for product in incoming {
            match self.products.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => *existing = product,
                None => self.products.push(product),
            }
        }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All known products, in merge order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct category names, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.products.iter().map(|p| p.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::sample::sample_products;

    #[test]
    fn test_merge_deduplicates_by_id() {
        let mut store = CatalogStore::default();
        store.merge(sample_products());
        store.merge(sample_products());
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn test_merge_refreshes_existing_entry_in_place() {
        let mut store = CatalogStore::default();
        store.merge(sample_products());

        let mut updated = sample_products();
        updated.first_mut().unwrap().title = "Renamed Headphones".to_string();
        store.merge(updated);

        assert_eq!(store.len(), 6);
        let first = store.products().first().unwrap();
        assert_eq!(first.title, "Renamed Headphones");
    }

    #[test]
    fn test_get_by_id() {
        let mut store = CatalogStore::default();
        store.merge(sample_products());

        assert!(store.get(ProductId::new(3)).is_some());
        assert!(store.get(ProductId::new(999)).is_none());
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        let mut store = CatalogStore::default();
        store.merge(sample_products());

        let categories = store.categories();
        assert_eq!(
            categories,
            vec![
                "electronics".to_string(),
                "jewelery".to_string(),
                "men's clothing".to_string(),
                "women's clothing".to_string(),
            ]
        );
    }
}
