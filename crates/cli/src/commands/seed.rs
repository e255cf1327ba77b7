//! Seed the catalog with the launch products and gallery.
//!
//! Existing rows in `product` and `gallery` are deleted first. The whole run
//! is one transaction.

use tracing::info;

use way2rare_api::db::{self, seed::reseed};
use way2rare_core::seed;

use super::{CommandError, database_url};

/// Replace the catalog contents.
///
/// # Arguments
///
/// * `dry_run` - Log the records and exit without connecting
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or any insert fails (in which case nothing is changed).
pub async fn catalog(dry_run: bool) -> Result<(), CommandError> {
    let products = seed::products();
    let gallery = seed::gallery();

    if dry_run {
        for product in &products {
            info!(name = %product.name, price = %product.price, category = %product.category, "Would create product");
        }
        for post in &gallery {
            info!(handle = %post.handle, "Would create gallery post");
        }
        return Ok(());
    }

    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let report = reseed(&pool, &products, &gallery).await?;

    info!("Seeding complete!");
    info!("  Products cleared: {}", report.products_cleared);
    info!("  Gallery posts cleared: {}", report.gallery_cleared);
    info!("  Products created: {}", report.products_inserted);
    info!("  Gallery posts created: {}", report.gallery_inserted);

    Ok(())
}
