//! Integration tests for shop state persistence.
//!
//! These tests drive a [`Shop`] backed by a real on-disk [`FileStore`] and
//! verify that cart, wishlist, and theme survive a full close-and-reopen
//! cycle, the way a browser session would.

use shopease_core::ProductId;
use shopease_storefront::catalog::sample_products;
use shopease_storefront::shop::{CheckoutPolicy, Shop, Theme};
use shopease_storefront::storage::{FileStore, KvStore, storage_keys};
use tempfile::TempDir;

fn open_shop(dir: &TempDir) -> Shop {
    let store = FileStore::open(dir.path()).expect("store should open");
    let mut shop = Shop::open(Box::new(store), CheckoutPolicy::default());
    shop.catalog_mut().merge(sample_products());
    shop
}

#[test]
fn test_cart_survives_reopen() {
    let dir = TempDir::new().expect("tempdir");

    {
        let mut shop = open_shop(&dir);
        shop.add_to_cart(ProductId::new(1)).expect("persist");
        shop.add_to_cart(ProductId::new(1)).expect("persist");
        shop.add_to_cart(ProductId::new(3)).expect("persist");
    }

    let shop = open_shop(&dir);
    assert_eq!(shop.cart().len(), 2);
    assert_eq!(shop.cart_count(), 3);

    let line = shop
        .cart()
        .iter()
        .find(|line| line.id == ProductId::new(1))
        .expect("line for product 1");
    assert_eq!(line.quantity, 2);
}

#[test]
fn test_wishlist_and_theme_survive_reopen() {
    let dir = TempDir::new().expect("tempdir");

    {
        let mut shop = open_shop(&dir);
        shop.toggle_wishlist(ProductId::new(5)).expect("persist");
        shop.toggle_theme().expect("persist");
        assert_eq!(shop.theme(), Theme::Dark);
    }

    let shop = open_shop(&dir);
    assert_eq!(shop.wishlist_count(), 1);
    assert!(shop.is_wishlisted(ProductId::new(5)));
    assert_eq!(shop.theme(), Theme::Dark);
}

#[test]
fn test_placed_order_clears_persisted_cart() {
    let dir = TempDir::new().expect("tempdir");

    {
        let mut shop = open_shop(&dir);
        shop.add_to_cart(ProductId::new(2)).expect("persist");
        shop.begin_checkout().expect("cart has items");
        shop.place_order().expect("order placed");
    }

    let shop = open_shop(&dir);
    assert!(shop.cart().is_empty());
}

#[test]
fn test_corrupt_cart_file_loads_as_empty() {
    let dir = TempDir::new().expect("tempdir");

    {
        let mut shop = open_shop(&dir);
        shop.add_to_cart(ProductId::new(1)).expect("persist");
        shop.toggle_wishlist(ProductId::new(2)).expect("persist");
    }

    // Scribble over the cart file, leaving the wishlist intact.
    std::fs::write(
        dir.path().join(format!("{}.json", storage_keys::CART)),
        "{not json",
    )
    .expect("write");

    let shop = open_shop(&dir);
    assert!(shop.cart().is_empty());
    assert_eq!(shop.wishlist_count(), 1);
}

#[test]
fn test_stored_values_are_plain_json() {
    let dir = TempDir::new().expect("tempdir");

    {
        let mut shop = open_shop(&dir);
        shop.add_to_cart(ProductId::new(4)).expect("persist");
    }

    let store = FileStore::open(dir.path()).expect("store should open");
    let raw = store.get(storage_keys::CART).expect("cart stored");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");

    let lines = parsed.as_array().expect("array of lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], 4);
    assert_eq!(lines[0]["quantity"], 1);
}
