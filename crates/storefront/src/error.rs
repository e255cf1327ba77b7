//! Catalog fetch errors.
//!
//! None of these reach the shopper: the storefront records the message as a
//! diagnostic and keeps showing seed data.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when fetching the catalog from the API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection or transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete in time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The API answered with a non-success status.
    #[error("Failed to fetch products (HTTP {status})")]
    Status { status: u16, body: String },

    /// The body was not a product array.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API returned an empty product list.
    #[error("API returned no products")]
    Empty,

    /// The base address cannot be joined with the products path.
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),
}
