//! Customer rating summary attached to catalog products.

use serde::{Deserialize, Serialize};

/// Aggregate customer rating for a product.
///
/// Optional on catalog payloads; snapshotted onto wishlist entries so the
/// wishlist page can render without the catalog loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating, 0.0 to 5.0.
    pub rate: f64,
    /// Number of reviews behind the average.
    pub count: u32,
}

impl Rating {
    /// Create a new rating.
    #[must_use]
    pub const fn new(rate: f64, count: u32) -> Self {
        Self { rate, count }
    }
}
