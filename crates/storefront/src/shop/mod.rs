//! Cart and wishlist state management.
//!
//! [`Shop`] is the single application-state object: it owns the merged
//! catalog, the cart, the wishlist, and the theme flag, and it writes every
//! mutation through to the key-value store before returning. Handlers reach
//! it through the mutex in [`crate::state::AppState`]; nothing here touches
//! the network or the view layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopease_core::{Price, ProductId, Rating};
use thiserror::Error;
use tracing::debug;

use crate::catalog::CatalogStore;
use crate::storage::{self, KvStore, StorageError, storage_keys};

/// One cart entry: a product snapshot plus the requested quantity.
///
/// Uniqueness invariant: at most one line per product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// A saved-for-later product snapshot; set semantics keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rating: Option<Rating>,
}

/// Light/dark theme flag, persisted as a plain string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name == "dark" { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Severity of a transient user-visible notice (the toast analog).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    /// CSS class suffix for the notice banner.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A transient user-visible message emitted by shop operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Shipping cost policy applied at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPolicy {
    /// Orders with a subtotal strictly above this ship free.
    pub free_shipping_threshold: Decimal,
    /// Flat fee applied below the threshold.
    pub shipping_fee: Decimal,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::from(1500),
            shipping_fee: Decimal::from(99),
        }
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub grand_total: Price,
}

impl CartTotals {
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping == Price::ZERO
    }
}

/// Errors from shop operations.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The application-state object behind all cart/wishlist operations.
pub struct Shop {
    catalog: CatalogStore,
    cart: Vec<CartLine>,
    wishlist: Vec<WishlistEntry>,
    theme: Theme,
    policy: CheckoutPolicy,
    store: Box<dyn KvStore>,
}

impl Shop {
    /// Open the shop, loading any previously persisted cart, wishlist, and
    /// theme from the store. Corrupt or missing values load as empty.
    #[must_use]
    pub fn open(store: Box<dyn KvStore>, policy: CheckoutPolicy) -> Self {
        let cart = storage::load_list(store.as_ref(), storage_keys::CART);
        let wishlist = storage::load_list(store.as_ref(), storage_keys::WISHLIST);
        let theme = store
            .get(storage_keys::THEME)
            .map(|name| Theme::from_name(name.trim()))
            .unwrap_or_default();

        Self {
            catalog: CatalogStore::default(),
            cart,
            wishlist,
            theme,
            policy,
            store,
        }
    }

    // =========================================================================
    // Catalog access
    // =========================================================================

    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// Unknown product ids are a silent no-op. Otherwise increments the
    /// existing line or creates one with quantity 1 and persists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the updated cart cannot be persisted.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<Option<Notice>, StorageError> {
        let Some(product) = self.catalog.get(id).cloned() else {
            debug!(%id, "add_to_cart ignored: product not in catalog");
            return Ok(None);
        };

        match self.cart.iter_mut().find(|line| line.id == id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.cart.push(CartLine {
                id,
                title: product.title.clone(),
                price: product.price,
                image: product.image,
                quantity: 1,
            }),
        }

        self.persist()?;
        Ok(Some(Notice::success(format!(
            "{} added to cart!",
            product.title
        ))))
    }

    /// Remove a product's line from the cart. Idempotent: a second call for
    /// the same id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the updated cart cannot be persisted.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<Option<Notice>, StorageError> {
        let before = self.cart.len();
        self.cart.retain(|line| line.id != id);
        if self.cart.len() == before {
            return Ok(None);
        }

        self.persist()?;
        Ok(Some(Notice::info("Item removed from cart")))
    }

    /// Adjust a line's quantity by `delta`; a result of zero or less removes
    /// the line. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the updated cart cannot be persisted.
    pub fn change_quantity(
        &mut self,
        id: ProductId,
        delta: i32,
    ) -> Result<Option<Notice>, StorageError> {
        let Some(line) = self.cart.iter_mut().find(|line| line.id == id) else {
            return Ok(None);
        };

        let updated = i64::from(line.quantity) + i64::from(delta);
        if updated <= 0 {
            return self.remove_from_cart(id);
        }

        line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        self.persist()?;
        Ok(None)
    }

    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// Total number of units across all cart lines (the nav badge count).
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.cart.iter().map(|line| line.quantity).sum()
    }

    /// Subtotal, shipping, and grand total for the current cart.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal: Price = self.cart.iter().map(CartLine::line_total).sum();
        let shipping = if subtotal.amount() > self.policy.free_shipping_threshold {
            Price::ZERO
        } else {
            Price::new(self.policy.shipping_fee)
        };

        CartTotals {
            subtotal,
            shipping,
            grand_total: subtotal + shipping,
        }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Start checkout: totals for the confirmation screen.
    ///
    /// # Errors
    ///
    /// [`ShopError::EmptyCart`] if there is nothing to check out.
    pub fn begin_checkout(&self) -> Result<CartTotals, ShopError> {
        if self.cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }
        Ok(self.totals())
    }

    /// Complete a confirmed checkout: clears the cart and persists.
    ///
    /// Declining confirmation is simply not calling this; no state changes.
    ///
    /// # Errors
    ///
    /// [`ShopError::EmptyCart`] if the cart is empty, or a storage error if
    /// the cleared cart cannot be persisted.
    pub fn place_order(&mut self) -> Result<Notice, ShopError> {
        if self.cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        self.cart.clear();
        self.persist()?;
        Ok(Notice::success("Order placed successfully! \u{1f389}"))
    }

    // =========================================================================
    // Wishlist operations
    // =========================================================================

    /// Toggle wishlist membership for a product.
    ///
    /// Removal works from the stored snapshot alone; adding requires the
    /// product to be present in the catalog (silent no-op otherwise).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the updated wishlist cannot be persisted.
    pub fn toggle_wishlist(&mut self, id: ProductId) -> Result<Option<Notice>, StorageError> {
        if let Some(pos) = self.wishlist.iter().position(|entry| entry.id == id) {
            let entry = self.wishlist.remove(pos);
            self.persist()?;
            return Ok(Some(Notice::info(format!(
                "{} removed from wishlist",
                entry.title
            ))));
        }

        let Some(product) = self.catalog.get(id).cloned() else {
            debug!(%id, "toggle_wishlist ignored: product not in catalog");
            return Ok(None);
        };

        self.wishlist.push(WishlistEntry {
            id,
            title: product.title.clone(),
            price: product.price,
            image: product.image,
            category: product.category,
            rating: product.rating,
        });
        self.persist()?;
        Ok(Some(Notice::success(format!(
            "{} added to wishlist!",
            product.title
        ))))
    }

    /// Move a wishlisted product into the cart: transferred, not duplicated.
    /// No-op if the product is not on the wishlist.
    ///
    /// Works from the wishlist snapshot so it does not need the catalog
    /// loaded.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the updated state cannot be persisted.
    pub fn move_to_cart(&mut self, id: ProductId) -> Result<Option<Notice>, StorageError> {
        let Some(entry) = self.wishlist.iter().find(|entry| entry.id == id).cloned() else {
            return Ok(None);
        };

        match self.cart.iter_mut().find(|line| line.id == id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.cart.push(CartLine {
                id,
                title: entry.title.clone(),
                price: entry.price,
                image: entry.image,
                quantity: 1,
            }),
        }
        self.wishlist.retain(|e| e.id != id);

        self.persist()?;
        Ok(Some(Notice::success(format!(
            "{} moved to cart",
            entry.title
        ))))
    }

    #[must_use]
    pub fn wishlist(&self) -> &[WishlistEntry] {
        &self.wishlist
    }

    #[must_use]
    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    #[must_use]
    pub fn is_wishlisted(&self, id: ProductId) -> bool {
        self.wishlist.iter().any(|entry| entry.id == id)
    }

    // =========================================================================
    // Theme
    // =========================================================================

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme flag and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the flag cannot be written.
    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        self.theme = self.theme.toggled();
        self.store.set(storage_keys::THEME, self.theme.as_str())?;
        Ok(self.theme)
    }

    fn persist(&self) -> Result<(), StorageError> {
        storage::save_list(self.store.as_ref(), storage_keys::CART, &self.cart)?;
        storage::save_list(self.store.as_ref(), storage_keys::WISHLIST, &self.wishlist)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{Product, sample_products};
    use crate::storage::MemoryStore;

    fn product(id: i64, title: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::new(Decimal::from(price)),
            description: String::new(),
            category: "test".to_string(),
            image: String::new(),
            rating: None,
        }
    }

    fn shop_with(products: Vec<Product>) -> Shop {
        let mut shop = Shop::open(Box::new(MemoryStore::default()), CheckoutPolicy::default());
        shop.catalog_mut().merge(products);
        shop
    }

    #[test]
    fn test_repeat_add_increments_single_line() {
        let mut shop = shop_with(sample_products());
        let id = ProductId::new(1);

        shop.add_to_cart(id).unwrap();
        shop.add_to_cart(id).unwrap();

        assert_eq!(shop.cart().len(), 1);
        assert_eq!(shop.cart().first().unwrap().quantity, 2);
        assert_eq!(shop.cart_count(), 2);
    }

    #[test]
    fn test_add_unknown_product_is_silent_noop() {
        let mut shop = shop_with(sample_products());

        let notice = shop.add_to_cart(ProductId::new(999)).unwrap();

        assert!(notice.is_none());
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_add_emits_confirmation_notice() {
        let mut shop = shop_with(vec![product(1, "Widget", 10)]);

        let notice = shop.add_to_cart(ProductId::new(1)).unwrap().unwrap();

        assert_eq!(notice.level, NoticeLevel::Success);
        assert!(notice.message.contains("Widget"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut shop = shop_with(sample_products());
        let id = ProductId::new(2);
        shop.add_to_cart(id).unwrap();

        let first = shop.remove_from_cart(id).unwrap();
        let second = shop.remove_from_cart(id).unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_change_quantity_to_zero_removes_line() {
        let mut shop = shop_with(sample_products());
        let id = ProductId::new(1);
        shop.add_to_cart(id).unwrap();

        shop.change_quantity(id, -1).unwrap();

        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_change_quantity_adjusts_and_floors_at_removal() {
        let mut shop = shop_with(sample_products());
        let id = ProductId::new(1);
        shop.add_to_cart(id).unwrap();

        shop.change_quantity(id, 3).unwrap();
        assert_eq!(shop.cart().first().unwrap().quantity, 4);

        shop.change_quantity(id, -10).unwrap();
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_quantity_saturates_at_max() {
        let mut shop = shop_with(sample_products());
        let id = ProductId::new(1);
        shop.add_to_cart(id).unwrap();

        // 1 + i32::MAX + i32::MAX lands exactly on u32::MAX
        shop.change_quantity(id, i32::MAX).unwrap();
        shop.change_quantity(id, i32::MAX).unwrap();
        assert_eq!(shop.cart().first().unwrap().quantity, u32::MAX);

        shop.add_to_cart(id).unwrap();
        assert_eq!(shop.cart().first().unwrap().quantity, u32::MAX);

        shop.toggle_wishlist(id).unwrap();
        shop.move_to_cart(id).unwrap();
        assert_eq!(shop.cart().first().unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_toggle_wishlist_twice_restores_original_state() {
        let mut shop = shop_with(sample_products());
        let id = ProductId::new(3);

        let added = shop.toggle_wishlist(id).unwrap().unwrap();
        assert_eq!(added.level, NoticeLevel::Success);
        assert!(shop.is_wishlisted(id));

        let removed = shop.toggle_wishlist(id).unwrap().unwrap();
        assert_eq!(removed.level, NoticeLevel::Info);
        assert!(!shop.is_wishlisted(id));
        assert_eq!(shop.wishlist_count(), 0);
    }

    #[test]
    fn test_wishlist_snapshot_includes_rating() {
        let mut shop = shop_with(sample_products());
        shop.toggle_wishlist(ProductId::new(1)).unwrap();

        let entry = shop.wishlist().first().unwrap();
        assert!(entry.rating.is_some());
    }

    #[test]
    fn test_move_to_cart_transfers_without_duplicating() {
        let mut shop = shop_with(sample_products());
        let id = ProductId::new(4);
        shop.toggle_wishlist(id).unwrap();

        shop.move_to_cart(id).unwrap();

        assert!(!shop.is_wishlisted(id));
        assert_eq!(shop.cart().len(), 1);
        assert_eq!(shop.cart().first().unwrap().quantity, 1);
    }

    #[test]
    fn test_move_to_cart_requires_wishlist_membership() {
        let mut shop = shop_with(sample_products());

        let notice = shop.move_to_cart(ProductId::new(4)).unwrap();

        assert!(notice.is_none());
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_totals_below_threshold_add_flat_fee() {
        // Two lines: 10 x2 and 20 x1 -> subtotal 40, below the 1500 threshold
        let mut shop = shop_with(vec![product(1, "Ten", 10), product(2, "Twenty", 20)]);
        shop.add_to_cart(ProductId::new(1)).unwrap();
        shop.add_to_cart(ProductId::new(1)).unwrap();
        shop.add_to_cart(ProductId::new(2)).unwrap();

        let totals = shop.totals();
        assert_eq!(totals.subtotal, Price::new(Decimal::from(40)));
        assert_eq!(totals.shipping, Price::new(Decimal::from(99)));
        assert_eq!(totals.grand_total, Price::new(Decimal::from(139)));
        assert!(!totals.free_shipping());
    }

    #[test]
    fn test_totals_above_threshold_ship_free() {
        let mut shop = shop_with(vec![product(1, "Pricey", 1600)]);
        shop.add_to_cart(ProductId::new(1)).unwrap();

        let totals = shop.totals();
        assert_eq!(totals.shipping, Price::ZERO);
        assert_eq!(totals.grand_total, Price::new(Decimal::from(1600)));
        assert!(totals.free_shipping());
    }

    #[test]
    fn test_totals_at_exact_threshold_still_pay_shipping() {
        // Free shipping requires strictly exceeding the threshold
        let mut shop = shop_with(vec![product(1, "Edge", 1500)]);
        shop.add_to_cart(ProductId::new(1)).unwrap();

        assert_eq!(shop.totals().shipping, Price::new(Decimal::from(99)));
    }

    #[test]
    fn test_checkout_empty_cart_is_rejected() {
        let mut shop = shop_with(sample_products());

        assert!(matches!(shop.begin_checkout(), Err(ShopError::EmptyCart)));
        assert!(matches!(shop.place_order(), Err(ShopError::EmptyCart)));
    }

    #[test]
    fn test_confirmed_checkout_clears_cart() {
        let mut shop = shop_with(vec![product(1, "Ten", 10), product(2, "Twenty", 20)]);
        shop.add_to_cart(ProductId::new(1)).unwrap();
        shop.add_to_cart(ProductId::new(1)).unwrap();
        shop.add_to_cart(ProductId::new(2)).unwrap();

        let totals = shop.begin_checkout().unwrap();
        assert_eq!(totals.grand_total, Price::new(Decimal::from(139)));

        // Declining confirmation means not calling place_order: cart intact
        assert_eq!(shop.cart().len(), 2);

        let notice = shop.place_order().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_state_round_trips_through_store() {
        let store = Box::new(MemoryStore::default());
        let mut shop = Shop::open(store, CheckoutPolicy::default());
        shop.catalog_mut().merge(sample_products());
        shop.add_to_cart(ProductId::new(1)).unwrap();
        shop.add_to_cart(ProductId::new(1)).unwrap();
        shop.toggle_wishlist(ProductId::new(2)).unwrap();
        shop.toggle_theme().unwrap();

        // Reopen semantics are covered by the integration tests over
        // FileStore; here verify the persisted JSON directly.
        let cart: Vec<CartLine> = storage::load_list(shop.store.as_ref(), storage_keys::CART);
        assert_eq!(cart, shop.cart);

        let wishlist: Vec<WishlistEntry> =
            storage::load_list(shop.store.as_ref(), storage_keys::WISHLIST);
        assert_eq!(wishlist, shop.wishlist);

        assert_eq!(
            shop.store.get(storage_keys::THEME).unwrap(),
            Theme::Dark.as_str()
        );
    }

    #[test]
    fn test_open_recovers_from_corrupt_cart() {
        let store = MemoryStore::default();
        store.set(storage_keys::CART, "{definitely not json").unwrap();
        store.set(storage_keys::THEME, "dark").unwrap();

        let shop = Shop::open(Box::new(store), CheckoutPolicy::default());

        assert!(shop.cart().is_empty());
        assert_eq!(shop.theme(), Theme::Dark);
    }
}
