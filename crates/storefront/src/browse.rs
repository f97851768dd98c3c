//! Pure filter/sort engine for the products page.
//!
//! Maps `(catalog, filter)` to a new ordered list without mutating the input.
//! Sorting is stable: products with equal keys keep their catalog order.

use crate::catalog::Product;

/// Sort modes offered by the products page.
///
/// Query-string values match the sort select options on the products page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Unsorted,
    PriceLowHigh,
    PriceHighLow,
    TitleAToZ,
    TitleZToA,
}

impl SortOrder {
    /// Parse a query-string value; anything unrecognized means no sort.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "low-high" => Self::PriceLowHigh,
            "high-low" => Self::PriceHighLow,
            "az" => Self::TitleAToZ,
            "za" => Self::TitleZToA,
            _ => Self::Unsorted,
        }
    }

    /// The query-string value for this mode.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Unsorted => "",
            Self::PriceLowHigh => "low-high",
            Self::PriceHighLow => "high-low",
            Self::TitleAToZ => "az",
            Self::TitleZToA => "za",
        }
    }
}

/// Search, category, and sort selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against title, category, and
    /// description. Empty means no search.
    pub search: String,
    /// Exact category match. Empty means no category filter.
    pub category: String,
    pub sort: SortOrder,
}

impl ProductFilter {
    /// True when no search, category, or sort is applied.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search.trim().is_empty()
            && self.category.is_empty()
            && self.sort == SortOrder::Unsorted
    }
}

/// Apply a filter to the catalog, returning a new ordered list.
#[must_use]
pub fn apply(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    let search = filter.search.trim().to_lowercase();

    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|p| matches_search(p, &search))
        .filter(|p| filter.category.is_empty() || p.category == filter.category)
        .cloned()
        .collect();

    match filter.sort {
        SortOrder::Unsorted => {}
        SortOrder::PriceLowHigh => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceHighLow => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::TitleAToZ => filtered.sort_by(|a, b| title_key(a).cmp(&title_key(b))),
        SortOrder::TitleZToA => filtered.sort_by(|a, b| title_key(b).cmp(&title_key(a))),
    }

    filtered
}

fn matches_search(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product.title.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

fn title_key(product: &Product) -> String {
    product.title.to_lowercase()
}
