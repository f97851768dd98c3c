//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use shopease_core::ProductId;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::routes::{Chrome, Page, sanitize_return_to};
use crate::shop::WishlistEntry;
use crate::state::AppState;

/// Wishlist entry display data for templates.
#[derive(Clone)]
pub struct WishlistItemView {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub price: String,
    pub category: String,
    pub rating_rate: String,
    pub rating_count: u32,
}

impl From<&WishlistEntry> for WishlistItemView {
    fn from(entry: &WishlistEntry) -> Self {
        let (rate, count) = entry
            .rating
            .as_ref()
            .map_or((4.2, 100), |r| (r.rate, r.count));

        Self {
            id: entry.id.as_i64(),
            title: entry.title.clone(),
            image: entry.image.clone(),
            price: entry.price.to_string(),
            category: entry.category.clone(),
            rating_rate: format!("{rate:.1}"),
            rating_count: count,
        }
    }
}

/// Wishlist mutation form data.
#[derive(Debug, Deserialize)]
pub struct WishlistForm {
    pub product_id: ProductId,
    pub return_to: Option<String>,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist.html")]
pub struct WishlistTemplate {
    pub chrome: Chrome,
    pub items: Vec<WishlistItemView>,
}

/// Display the wishlist page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> WishlistTemplate {
    let items = {
        let shop = state.shop();
        shop.wishlist().iter().map(WishlistItemView::from).collect()
    };

    WishlistTemplate {
        chrome: Chrome::build(&state, Page::Wishlist),
        items,
    }
}

/// Toggle a product's wishlist membership, then redirect back.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Form(form): Form<WishlistForm>,
) -> Result<Redirect, AppError> {
    let notice = state.shop().toggle_wishlist(form.product_id)?;
    if let Some(notice) = notice {
        state.push_notice(notice);
    }

    Ok(Redirect::to(sanitize_return_to(
        form.return_to.as_deref(),
        Page::Products.href(),
    )))
}

/// Move a wishlist entry into the cart.
#[instrument(skip(state))]
pub async fn move_to_cart(
    State(state): State<AppState>,
    Form(form): Form<WishlistForm>,
) -> Result<Redirect, AppError> {
    let notice = state.shop().move_to_cart(form.product_id)?;
    if let Some(notice) = notice {
        state.push_notice(notice);
    }

    Ok(Redirect::to(sanitize_return_to(
        form.return_to.as_deref(),
        Page::Wishlist.href(),
    )))
}
