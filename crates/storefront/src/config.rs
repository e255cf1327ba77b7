//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VITE_API_URL` - Catalog API base address (falls back to `STOREFRONT_API_URL`).
//!   When unset the storefront serves the bundled seed catalog without touching
//!   the network.
//! - `STOREFRONT_CURRENCY` - Currency prefix for prices (default: `$`)
//! - `STOREFRONT_DELIVERY_FEE` - Flat delivery fee (default: 10)
//! - `STOREFRONT_FETCH_TIMEOUT_SECS` - Catalog fetch timeout (default: 5)
//! - `STOREFRONT_PLACEHOLDER_IMAGE` - Image shown for products without one

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use way2rare_core::Price;

/// Default fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Default placeholder for products without images.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/assets/placeholder.png";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API base address; `None` means seed data only
    pub api_url: Option<Url>,
    /// Currency prefix for rendered prices
    pub currency: String,
    /// Flat delivery fee
    pub delivery_fee: Price,
    /// Timeout for the catalog fetch
    pub fetch_timeout: Duration,
    /// Image used when a product has none
    pub placeholder_image: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            currency: "$".to_string(),
            delivery_fee: Price::from_units(10),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let api_url = get("VITE_API_URL")
            .or_else(|| get("STOREFRONT_API_URL"))
            .map(|raw| parse_base_url(&raw))
            .transpose()?;

        let delivery_fee = match get("STOREFRONT_DELIVERY_FEE") {
            Some(raw) => Decimal::from_str(&raw)
                .map_err(|e| e.to_string())
                .and_then(|d| Price::new(d).map_err(|e| e.to_string()))
                .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_DELIVERY_FEE".to_string(), e))?,
            None => defaults.delivery_fee,
        };

        let fetch_timeout = match get("STOREFRONT_FETCH_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidEnvVar(
                        "STOREFRONT_FETCH_TIMEOUT_SECS".to_string(),
                        format!("expected a positive number of seconds, got '{raw}'"),
                    ));
                }
            },
            None => defaults.fetch_timeout,
        };

        Ok(Self {
            api_url,
            currency: get("STOREFRONT_CURRENCY").unwrap_or(defaults.currency),
            delivery_fee,
            fetch_timeout,
            placeholder_image: get("STOREFRONT_PLACEHOLDER_IMAGE")
                .unwrap_or(defaults.placeholder_image),
        })
    }

    /// Set the API base address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `raw` is not an http(s) URL.
    pub fn with_api_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_url = Some(parse_base_url(raw)?);
        Ok(self)
    }
}

/// Parse an API base address, normalizing it to end in `/` so relative
/// joins keep any path prefix.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("VITE_API_URL".to_string(), msg);

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.api_url.is_none());
        assert_eq!(config.currency, "$");
        assert_eq!(config.delivery_fee, Price::from_units(10));
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_vite_api_url_wins() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("VITE_API_URL", "http://localhost:8000"),
            ("STOREFRONT_API_URL", "http://other:9000"),
        ]))
        .unwrap();
        assert_eq!(config.api_url.unwrap().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let config = StorefrontConfig::default()
            .with_api_url("https://shop.example/catalog")
            .unwrap();
        let url = config.api_url.unwrap();
        assert_eq!(
            url.join("api/products").unwrap().as_str(),
            "https://shop.example/catalog/api/products"
        );
    }

    #[test]
    fn test_blank_api_url_means_seed_only() {
        let config = StorefrontConfig::from_lookup(lookup(&[("VITE_API_URL", "  ")])).unwrap();
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(StorefrontConfig::from_lookup(lookup(&[("VITE_API_URL", "ftp://x")])).is_err());
        assert!(
            StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_DELIVERY_FEE", "-1")])).is_err()
        );
        assert!(
            StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_FETCH_TIMEOUT_SECS", "0")]))
                .is_err()
        );
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("STOREFRONT_CURRENCY", "€"),
            ("STOREFRONT_DELIVERY_FEE", "4.50"),
            ("STOREFRONT_FETCH_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.currency, "€");
        assert_eq!(config.delivery_fee.display("€"), "€4.50");
        assert_eq!(config.fetch_timeout, Duration::from_secs(2));
    }
}
