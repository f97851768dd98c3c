//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured products)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing with search/category/sort
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add product (redirects back)
//! POST /cart/update            - Adjust line quantity
//! POST /cart/remove            - Remove line
//!
//! # Checkout
//! GET  /checkout               - Confirmation page with totals
//! POST /checkout/confirm       - Place the order (clears cart)
//!
//! # Wishlist
//! GET  /wishlist               - Wishlist page
//! POST /wishlist/toggle        - Toggle membership
//! POST /wishlist/move-to-cart  - Transfer an entry into the cart
//!
//! # Misc
//! POST /newsletter/subscribe   - Simulated newsletter signup
//! POST /theme/toggle           - Flip the light/dark theme flag
//! ```

pub mod cart;
pub mod home;
pub mod newsletter;
pub mod products;
pub mod theme;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::shop::Notice;
use crate::state::AppState;

/// Create the cart and checkout routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove", post(cart::remove))
        .route("/checkout", get(cart::checkout))
        .route("/checkout/confirm", post(cart::confirm))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(wishlist::show))
        .route("/wishlist/toggle", post(wishlist::toggle))
        .route("/wishlist/move-to-cart", post(wishlist::move_to_cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/products", get(products::index))
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .route("/theme/toggle", post(theme::toggle))
        .merge(cart_routes())
        .merge(wishlist_routes())
}

// =============================================================================
// Shared page chrome
// =============================================================================

/// The page a request is rendering, used to highlight the active nav link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Products,
    Wishlist,
    Cart,
}

impl Page {
    /// Stable name used by templates to mark the active link.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Products => "products",
            Self::Wishlist => "wishlist",
            Self::Cart => "cart",
        }
    }

    /// Canonical path for the page, used as a post-action return target.
    #[must_use]
    pub const fn href(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Products => "/products",
            Self::Wishlist => "/wishlist",
            Self::Cart => "/cart",
        }
    }
}

/// Shared chrome rendered on every page: active nav link, badges, theme, and
/// any pending notice.
pub struct Chrome {
    pub active: Page,
    pub theme: &'static str,
    pub cart_count: u32,
    pub wishlist_count: usize,
    pub notice: Option<Notice>,
}

impl Chrome {
    /// Build the chrome for a page, consuming the pending notice.
    #[must_use]
    pub fn build(state: &AppState, active: Page) -> Self {
        let (theme, cart_count, wishlist_count) = {
            let shop = state.shop();
            (
                shop.theme().as_str(),
                shop.cart_count(),
                shop.wishlist_count(),
            )
        };

        Self {
            active,
            theme,
            cart_count,
            wishlist_count,
            notice: state.take_notice(),
        }
    }
}

/// Clamp a user-supplied redirect target to a local path.
///
/// Anything that is not a same-site absolute path falls back to `default`,
/// so form fields cannot turn the redirect-after-post into an open redirect.
#[must_use]
pub fn sanitize_return_to<'a>(target: Option<&'a str>, default: &'a str) -> &'a str {
    match target {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => default,
    }
}
