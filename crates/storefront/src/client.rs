//! HTTP client for the catalog API.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};
use url::Url;

use way2rare_core::Product;

use crate::error::FetchError;

/// Path of the product list, relative to the API base address.
const PRODUCTS_PATH: &str = "api/products";

/// Longest body excerpt kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 200;

/// Client for the catalog API.
///
/// Cheap to clone. Issues exactly one request per call; there are no
/// retries.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    products_url: Url,
    timeout: Duration,
}

impl CatalogClient {
    /// Create a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Url` if the products path cannot be joined onto
    /// `base_url`, or `FetchError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, FetchError> {
        let products_url = base_url.join(PRODUCTS_PATH)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                products_url,
                timeout,
            }),
        })
    }

    /// The full product list URL.
    #[must_use]
    pub fn products_url(&self) -> &Url {
        &self.inner.products_url
    }

    /// Fetch the product list.
    ///
    /// # Errors
    ///
    /// - `FetchError::Timeout` if the request exceeds the configured timeout
    /// - `FetchError::Http` on connection failure
    /// - `FetchError::Status` on a non-2xx response
    /// - `FetchError::Parse` if the body is not a product array
    /// - `FetchError::Empty` if the array is empty
    #[instrument(skip(self), fields(url = %self.inner.products_url))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let response = self
            .inner
            .client
            .get(self.inner.products_url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
            debug!(status = %status, body = %excerpt, "Catalog API returned non-success status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: excerpt,
            });
        }

        let products: Vec<Product> = serde_json::from_str(&body)?;
        if products.is_empty() {
            return Err(FetchError::Empty);
        }

        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.inner.timeout)
        } else {
            FetchError::Http(err)
        }
    }
}
