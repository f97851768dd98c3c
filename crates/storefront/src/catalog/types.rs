//! Catalog API payload types.

use serde::{Deserialize, Serialize};
use shopease_core::{Price, ProductId, Rating};

/// A catalog product as returned by the Fake Store API.
///
/// Immutable once fetched; cart and wishlist entries copy the fields they
/// need rather than holding references into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub rating: Option<Rating>,
}
