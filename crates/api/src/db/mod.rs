//! Catalog store access.
//!
//! # Database: `way2rare`
//!
//! ## Tables
//!
//! - `product` - Catalog products (images and sizes as `TEXT[]`)
//! - `gallery` - Gallery posts credited to social handles
//!
//! Both tables are written only by the seed step; the API reads them.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p way2rare-cli -- migrate
//! ```

pub mod memory;
pub mod products;
pub mod seed;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use way2rare_core::{GalleryPost, Product};

pub use memory::InMemoryCatalogStore;
pub use products::PgCatalogStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store is not reachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the catalog.
///
/// Implementations must return products in insertion order and gallery posts
/// newest first.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    /// Short name for logs (`postgres`, `memory`).
    fn backend(&self) -> &'static str;

    /// All products, in insertion order.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// One product by store key.
    async fn get_product(&self, key: i32) -> Result<Option<Product>, StoreError>;

    /// All gallery posts, newest first.
    async fn list_gallery(&self) -> Result<Vec<GalleryPost>, StoreError>;

    /// Trivial liveness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url.expose_secret())
        .await
}
