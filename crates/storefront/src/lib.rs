//! Way2Rare storefront catalog.
//!
//! The browser-side half of the catalog pipeline:
//!
//! - [`CatalogClient`] fetches the product list from the catalog API.
//! - [`Storefront`] owns the unified product collection. It starts from the
//!   bundled seed catalog, swaps in API data when a fetch succeeds, and keeps
//!   the seed whenever the API is missing, failing or empty.
//! - [`ProductView`] formats products for display.
//!
//! Filtering and sorting live in `way2rare_core` and are re-exported here.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod state;
pub mod view;

pub use client::CatalogClient;
pub use config::StorefrontConfig;
pub use error::FetchError;
pub use state::{Catalog, CatalogSource, CatalogStatus, Mount, SearchState, Storefront};
pub use view::ProductView;
pub use way2rare_core::{CatalogQuery, CategoryFilter, SortMode};
