//! Cart and checkout route handlers.
//!
//! Mutations are classic redirect-after-post: the shop operation runs under
//! the state mutex, its notice (if any) is queued as a flash message, and the
//! browser is sent back to where it came from.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shopease_core::ProductId;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::routes::{Chrome, Page, sanitize_return_to};
use crate::shop::{CartLine, CartTotals, Notice, ShopError};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub price: String,
    pub line_total: String,
    pub quantity: u32,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.as_i64(),
            title: line.title.clone(),
            image: line.image.clone(),
            price: line.price.to_string(),
            line_total: line.line_total().to_string(),
            quantity: line.quantity,
        }
    }
}

/// Totals display data for templates.
#[derive(Clone)]
pub struct TotalsView {
    pub subtotal: String,
    pub shipping: String,
    pub grand_total: String,
    pub free_shipping: bool,
}

impl From<&CartTotals> for TotalsView {
    fn from(totals: &CartTotals) -> Self {
        Self {
            subtotal: totals.subtotal.to_string(),
            shipping: totals.shipping.to_string(),
            grand_total: totals.grand_total.to_string(),
            free_shipping: totals.free_shipping(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub return_to: Option<String>,
}

/// Quantity adjustment form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub delta: i32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub chrome: Chrome,
    pub items: Vec<CartItemView>,
    pub totals: TotalsView,
}

/// Checkout confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub chrome: Chrome,
    pub totals: TotalsView,
    pub item_count: u32,
}

/// Display the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> CartTemplate {
    let (items, totals) = {
        let shop = state.shop();
        let items = shop.cart().iter().map(CartItemView::from).collect();
        (items, TotalsView::from(&shop.totals()))
    };

    CartTemplate {
        chrome: Chrome::build(&state, Page::Cart),
        items,
        totals,
    }
}

/// Add one unit of a product to the cart, then redirect back.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect, AppError> {
    let notice = state.shop().add_to_cart(form.product_id)?;
    if let Some(notice) = notice {
        state.push_notice(notice);
    }

    Ok(Redirect::to(sanitize_return_to(
        form.return_to.as_deref(),
        Page::Products.href(),
    )))
}

/// Adjust a cart line's quantity.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect, AppError> {
    let notice = state.shop().change_quantity(form.product_id, form.delta)?;
    if let Some(notice) = notice {
        state.push_notice(notice);
    }

    Ok(Redirect::to(Page::Cart.href()))
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect, AppError> {
    let notice = state.shop().remove_from_cart(form.product_id)?;
    if let Some(notice) = notice {
        state.push_notice(notice);
    }

    Ok(Redirect::to(Page::Cart.href()))
}

/// Display the checkout confirmation page.
///
/// An empty cart cannot be checked out; the user is bounced back to the cart
/// page with a warning.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Response {
    let started = {
        let shop = state.shop();
        shop.begin_checkout().map(|totals| {
            (TotalsView::from(&totals), shop.cart_count())
        })
    };

    match started {
        Ok((totals, item_count)) => CheckoutTemplate {
            chrome: Chrome::build(&state, Page::Cart),
            totals,
            item_count,
        }
        .into_response(),
        Err(ShopError::EmptyCart) => {
            state.push_notice(Notice::error("Your cart is empty!"));
            Redirect::to(Page::Cart.href()).into_response()
        }
        Err(error) => AppError::from(error).into_response(),
    }
}

/// Place the order: clears the cart and persists.
///
/// Declining confirmation never reaches this handler, so a decline leaves the
/// cart untouched.
#[instrument(skip(state))]
pub async fn confirm(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let placed = state.shop().place_order();

    match placed {
        Ok(notice) => {
            state.push_notice(notice);
            Ok(Redirect::to(Page::Cart.href()))
        }
        Err(ShopError::EmptyCart) => {
            state.push_notice(Notice::error("Your cart is empty!"));
            Ok(Redirect::to(Page::Cart.href()))
        }
        Err(error) => Err(error.into()),
    }
}
