//! Gallery route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use way2rare_core::GalleryPost;

use crate::error::Result;
use crate::state::AppState;

/// List gallery posts, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<GalleryPost>>> {
    let posts = state
        .store()
        .list_gallery()
        .await
        .map_err(|e| state.store_error("Failed to fetch gallery", e))?;

    Ok(Json(posts))
}
