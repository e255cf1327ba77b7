//! `PostgreSQL`-backed catalog store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use way2rare_core::{GalleryPost, GalleryPostId, Price, Product, ProductId};

use super::{CatalogStore, StoreError};

/// Catalog store reading from the `product` and `gallery` tables.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Create a new store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: String,
    price: Decimal,
    images: Vec<String>,
    category: String,
    sizes: Vec<String>,
    is_current: bool,
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::new(row.price).map_err(|e| {
            StoreError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: ProductId::from(row.id),
            name: row.name,
            description: row.description,
            price,
            images: row.images,
            category: row.category,
            sizes: row.sizes,
            is_current: row.is_current,
        })
    }
}

/// Internal row type for gallery queries.
#[derive(Debug, sqlx::FromRow)]
struct GalleryRow {
    id: i32,
    image: String,
    handle: String,
    created_at: DateTime<Utc>,
}

impl From<GalleryRow> for GalleryPost {
    fn from(row: GalleryRow) -> Self {
        Self {
            id: GalleryPostId::new(row.id),
            image: row.image,
            handle: row.handle,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, images, category, sizes, is_current
            FROM product
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    #[instrument(skip(self))]
    async fn get_product(&self, key: i32) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, images, category, sizes, is_current
            FROM product
            WHERE id = $1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self))]
    async fn list_gallery(&self) -> Result<Vec<GalleryPost>, StoreError> {
        let rows = sqlx::query_as::<_, GalleryRow>(
            r"
            SELECT id, image, handle, created_at
            FROM gallery
            ORDER BY created_at DESC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
