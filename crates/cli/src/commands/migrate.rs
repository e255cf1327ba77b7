//! Database migration command.
//!
//! Migrations live in `crates/api/migrations/` and create the `product` and
//! `gallery` tables.

use tracing::info;

use way2rare_api::db;

use super::{CommandError, database_url};

/// Run catalog database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    info!("Connecting to catalog database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running catalog migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    info!("Catalog migrations complete!");
    Ok(())
}
