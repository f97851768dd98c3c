//! Fake Store API client.
//!
//! Plain REST JSON over `reqwest`, with a `moka` cache (5-minute TTL) in front
//! so page navigation does not hammer the upstream API. Both endpoints are
//! read-only and unauthenticated.

pub mod sample;
pub mod store;
pub mod types;

pub use sample::sample_products;
pub use store::CatalogStore;
pub use types::Product;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;

const CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors from the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request could not be sent or the response body was not valid JSON.
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("catalog API returned {0}")]
    Status(reqwest::StatusCode),

    /// The configured base URL does not form a valid endpoint.
    #[error("invalid catalog endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Client for the product catalog API.
///
/// Cheaply cloneable via `Arc`. Fetches are cached per endpoint.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    products_url: Url,
    cache: Cache<String, Arc<Vec<Product>>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let base: Url = config.base_url.parse()?;
        let products_url = base.join("products")?;

        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                products_url,
                cache,
            }),
        })
    }

    /// Fetch the full product list (`GET /products`).
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the API is unreachable or answers with
    /// a non-success status; callers fall back to the sample catalog.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Product>, CatalogError> {
        self.cached("products:all", self.inner.products_url.clone())
            .await
    }

    /// Fetch the bounded featured slice (`GET /products?limit=N`).
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on failure; the featured section is simply
    /// left empty.
    #[instrument(skip(self))]
    pub async fn fetch_featured(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
        let mut url = self.inner.products_url.clone();
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        self.cached(&format!("products:featured:{limit}"), url).await
    }

    async fn cached(&self, key: &str, url: Url) -> Result<Vec<Product>, CatalogError> {
        if let Some(hit) = self.inner.cache.get(key).await {
            debug!(key, "catalog cache hit");
            return Ok(hit.as_ref().clone());
        }

        let products = self.fetch_products(url).await?;
        self.inner
            .cache
            .insert(key.to_string(), Arc::new(products.clone()))
            .await;
        Ok(products)
    }

    async fn fetch_products(&self, url: Url) -> Result<Vec<Product>, CatalogError> {
        debug!(%url, "fetching catalog");
        let response = self.inner.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        Ok(response.json().await?)
    }
}
