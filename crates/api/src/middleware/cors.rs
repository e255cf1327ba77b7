//! CORS policy for browser clients.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the CORS layer.
///
/// An empty `origins` list allows any origin. Entries that are not valid
/// header values are skipped with a warning. Only `GET` is allowed since
/// every route is read-only.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::OPTIONS]);

    if origins.is_empty() {
        return layer.allow_origin(Any).allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|e| tracing::warn!(%origin, error = %e, "Skipping invalid CORS origin"))
                .ok()
        })
        .collect();

    layer
        .allow_origin(AllowOrigin::list(allowed))
        .allow_headers(Any)
}
