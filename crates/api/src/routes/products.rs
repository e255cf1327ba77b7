//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use way2rare_core::{Product, ProductId};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// List every product in store insertion order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state
        .store()
        .list_products()
        .await
        .map_err(|e| state.store_error("Failed to fetch products", e))?;

    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(products))
}

/// Fetch one product.
///
/// The id must be a positive integer store key; anything else is rejected
/// before the store is queried.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(raw): Path<String>) -> Result<Json<Product>> {
    let key = ProductId::parse(&raw)
        .and_then(|id| id.store_key())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .store()
        .get_product(key)
        .await
        .map_err(|e| state.store_error("Failed to fetch product", e))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Product".to_string()))
}
