//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::filters;
use crate::routes::products::ProductCardView;
use crate::routes::{Chrome, Page};
use crate::state::AppState;

/// Home page template: hero plus the featured product grid.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: Chrome,
    pub featured: Vec<ProductCardView>,
}

/// Display the home page.
///
/// A failed featured fetch leaves the section empty; the page itself always
/// renders.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> HomeTemplate {
    let limit = state.config().catalog.featured_limit;
    let featured = match state.catalog().fetch_featured(limit).await {
        Ok(products) => products,
        Err(error) => {
            tracing::warn!(%error, "failed to load featured products");
            Vec::new()
        }
    };

    let cards = {
        let mut shop = state.shop();
        shop.catalog_mut().merge(featured.clone());
        featured
            .iter()
            .map(|p| ProductCardView::from_product(p, shop.is_wishlisted(p.id)))
            .collect()
    };

    HomeTemplate {
        chrome: Chrome::build(&state, Page::Home),
        featured: cards,
    }
}
