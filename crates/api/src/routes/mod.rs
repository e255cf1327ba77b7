//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Process liveness (no store access)
//!
//! # Catalog
//! GET  /api/products           - All products, insertion order
//! GET  /api/products/{id}      - One product by store key
//! GET  /api/gallery            - Gallery posts, newest first
//! GET  /api/health             - Store liveness probe
//! ```
//!
//! Every route is read-only.

pub mod gallery;
pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .route("/gallery", get(gallery::index))
        .route("/health", get(health::store_health))
}

/// Create all routes for the catalog API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::liveness))
        .nest("/api", api_routes())
}
