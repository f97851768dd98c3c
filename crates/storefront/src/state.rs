//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::shop::{Notice, Shop};
use crate::storage::{FileStore, StorageError};

/// Error creating the application state.
#[derive(Debug, Error)]
pub enum StateInitError {
    #[error("failed to open state store: {0}")]
    Storage(#[from] StorageError),
    #[error("failed to build catalog client: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The shop (catalog, cart, wishlist, theme) is
/// the single logical user's state and sits behind a mutex; handlers take the
/// lock only between awaits, never across them.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    shop: Mutex<Shop>,
    /// Pending transient notice, shown on the next rendered page.
    flash: Mutex<Option<Notice>>,
}

impl AppState {
    /// Create a new application state, loading persisted shop state from the
    /// configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// catalog client cannot be constructed.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateInitError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let store = FileStore::open(&config.data_dir)?;
        let shop = Shop::open(Box::new(store), config.checkout.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                shop: Mutex::new(shop),
                flash: Mutex::new(None),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Lock the shop state.
    pub fn shop(&self) -> MutexGuard<'_, Shop> {
        self.inner
            .shop
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a transient notice for the next rendered page.
    pub fn push_notice(&self, notice: Notice) {
        *self
            .inner
            .flash
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(notice);
    }

    /// Take the pending notice, if any.
    pub fn take_notice(&self) -> Option<Notice> {
        self.inner
            .flash
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
