//! Storefront configuration loaded from environment variables.
//!
//! Every variable has a sensible default so the demo runs with zero
//! configuration.
//!
//! # Environment Variables
//!
//! - `SHOPEASE_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPEASE_PORT` - Listen port (default: 3000)
//! - `SHOPEASE_DATA_DIR` - Directory for persisted cart/wishlist/theme state
//!   (default: ./data)
//! - `SHOPEASE_CATALOG_URL` - Catalog API base URL
//!   (default: <https://fakestoreapi.com>)
//! - `SHOPEASE_FEATURED_LIMIT` - Size of the featured slice on the home page
//!   (default: 6)
//! - `SHOPEASE_CATALOG_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `SHOPEASE_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is
//!   free (default: 1500)
//! - `SHOPEASE_SHIPPING_FEE` - Flat shipping fee below the threshold
//!   (default: 99)
//! - `SENTRY_DSN` - Sentry error tracking DSN (optional)
//! - `SENTRY_ENVIRONMENT` - Sentry environment label (optional)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::shop::CheckoutPolicy;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory backing the persisted key-value store
    pub data_dir: PathBuf,
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Shipping cost policy
    pub checkout: CheckoutPolicy,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment label
    pub sentry_environment: Option<String>,
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    pub base_url: String,
    /// How many products the featured section shows
    pub featured_limit: usize,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse; unset
    /// variables fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: parse_env_or("SHOPEASE_HOST", "127.0.0.1")?,
            port: parse_env_or("SHOPEASE_PORT", "3000")?,
            data_dir: PathBuf::from(get_env_or_default("SHOPEASE_DATA_DIR", "data")),
            catalog: CatalogConfig {
                base_url: get_env_or_default("SHOPEASE_CATALOG_URL", "https://fakestoreapi.com"),
                featured_limit: parse_env_or("SHOPEASE_FEATURED_LIMIT", "6")?,
                request_timeout_secs: parse_env_or("SHOPEASE_CATALOG_TIMEOUT_SECS", "10")?,
            },
            checkout: CheckoutPolicy {
                free_shipping_threshold: parse_env_or("SHOPEASE_FREE_SHIPPING_THRESHOLD", "1500")?,
                shipping_fee: parse_env_or("SHOPEASE_SHIPPING_FEE", "99")?,
            },
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_dir: PathBuf::from("data"),
            catalog: CatalogConfig {
                base_url: "https://fakestoreapi.com".to_string(),
                featured_limit: 6,
                request_timeout_secs: 10,
            },
            checkout: CheckoutPolicy::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable with a default, reporting the variable name
/// on failure.
fn parse_env_or<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_parse_value_port() {
        let port: u16 = parse_value("SHOPEASE_PORT", "8080").unwrap();
        assert_eq!(port, 8080);

        let err = parse_value::<u16>("SHOPEASE_PORT", "not-a-port").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "SHOPEASE_PORT"));
    }

    #[test]
    fn test_parse_value_decimal() {
        let threshold: Decimal = parse_value("SHOPEASE_FREE_SHIPPING_THRESHOLD", "1500").unwrap();
        assert_eq!(threshold, Decimal::from(1500));

        assert!(parse_value::<Decimal>("SHOPEASE_SHIPPING_FEE", "ninety-nine").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.catalog.featured_limit, 6);
        assert_eq!(
            config.checkout.free_shipping_threshold,
            Decimal::from(1500)
        );
        assert_eq!(config.checkout.shipping_fee, Decimal::from(99));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            port: 4000,
            ..StorefrontConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 4000);
    }
}
