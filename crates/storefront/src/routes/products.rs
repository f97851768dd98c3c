//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::browse::{self, ProductFilter, SortOrder};
use crate::catalog::{Product, sample_products};
use crate::filters;
use crate::routes::{Chrome, Page};
use crate::shop::Notice;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i64,
    pub title: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub rating_rate: String,
    pub rating_count: u32,
    pub wishlisted: bool,
}

impl ProductCardView {
    /// Build a card from a catalog product.
    ///
    /// Rating falls back to placeholder values when the API omits it.
    #[must_use]
    pub fn from_product(product: &Product, wishlisted: bool) -> Self {
        let (rate, count) = product.rating.map_or((4.2, 100), |r| (r.rate, r.count));
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            category: product.category.clone(),
            rating_rate: format!("{rate:.1}"),
            rating_count: count,
            wishlisted,
        }
    }
}

/// Current filter selections, echoed back into the controls.
#[derive(Clone, Default)]
pub struct FilterView {
    pub q: String,
    pub category: String,
    pub sort: &'static str,
}

/// Search/filter/sort query parameters.
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub chrome: Chrome,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<String>,
    pub filter: FilterView,
    pub filtered: bool,
}

/// Display the product listing page.
///
/// Fetches the full catalog (falling back to the built-in sample catalog when
/// the API is unreachable), merges it into the session catalog, and applies
/// the requested filter/sort.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> ProductsTemplate {
    let fetched = match state.catalog().fetch_all().await {
        Ok(products) => products,
        Err(error) => {
            tracing::warn!(%error, "catalog fetch failed, using sample catalog");
            state.push_notice(Notice::error("Failed to load products"));
            sample_products()
        }
    };

    let product_filter = ProductFilter {
        search: query.q.clone().unwrap_or_default(),
        category: query.category.clone().unwrap_or_default(),
        sort: SortOrder::from_param(query.sort.as_deref().unwrap_or_default()),
    };

    let (products, categories) = {
        let mut shop = state.shop();
        shop.catalog_mut().merge(fetched);

        let visible = browse::apply(shop.catalog().products(), &product_filter);
        let cards = visible
            .iter()
            .map(|p| ProductCardView::from_product(p, shop.is_wishlisted(p.id)))
            .collect();
        (cards, shop.catalog().categories())
    };

    let filtered = !product_filter.is_unfiltered();
    ProductsTemplate {
        chrome: Chrome::build(&state, Page::Products),
        products,
        categories,
        filter: FilterView {
            q: product_filter.search,
            category: product_filter.category,
            sort: product_filter.sort.as_param(),
        },
        filtered,
    }
}
