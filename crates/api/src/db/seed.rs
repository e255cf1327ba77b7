//! Clear-and-repopulate seed step for the catalog tables.

use sqlx::PgPool;
use tracing::info;

use way2rare_core::Product;
use way2rare_core::seed::GallerySeed;

use super::StoreError;

/// Counts from a completed seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub products_cleared: u64,
    pub gallery_cleared: u64,
    pub products_inserted: usize,
    pub gallery_inserted: usize,
}

/// Delete every product and gallery row, then insert `products` and
/// `gallery` in order.
///
/// Runs in a single transaction: a failure part-way leaves the previous
/// catalog in place. Incoming product ids are ignored; the store assigns keys
/// in insertion order. Gallery posts get increasing `created_at` values so
/// the last post seeded is the newest.
///
/// # Errors
///
/// Returns `StoreError::Database` if any statement fails.
pub async fn reseed(
    pool: &PgPool,
    products: &[Product],
    gallery: &[GallerySeed],
) -> Result<SeedReport, StoreError> {
    let mut tx = pool.begin().await?;

    let products_cleared = sqlx::query("DELETE FROM product")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let gallery_cleared = sqlx::query("DELETE FROM gallery")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    for product in products {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO product (name, description, price, images, category, sizes, is_current)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.amount())
        .bind(&product.images)
        .bind(&product.category)
        .bind(&product.sizes)
        .bind(product.is_current)
        .fetch_one(&mut *tx)
        .await?;
        info!(id, name = %product.name, "Created product");
    }

    for (offset, post) in (0_i32..).zip(gallery) {
        sqlx::query(
            r"
            INSERT INTO gallery (image, handle, created_at)
            VALUES ($1, $2, NOW() + make_interval(secs => $3))
            ",
        )
        .bind(&post.image)
        .bind(&post.handle)
        .bind(f64::from(offset))
        .execute(&mut *tx)
        .await?;
        info!(handle = %post.handle, "Created gallery post");
    }

    tx.commit().await?;

    Ok(SeedReport {
        products_cleared,
        gallery_cleared,
        products_inserted: products.len(),
        gallery_inserted: gallery.len(),
    })
}
