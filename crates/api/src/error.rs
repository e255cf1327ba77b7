//! Unified error handling with Sentry integration.
//!
//! Provides a unified `ApiError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, ApiError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

/// Application-level error type for the catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The catalog store failed or could not be reached.
    #[error("Store unavailable: {source}")]
    StoreUnavailable {
        /// Client-facing summary, e.g. "Failed to fetch products".
        context: &'static str,
        #[source]
        source: StoreError,
        /// Include `source` in the response body (development only).
        expose_detail: bool,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Wrap a store failure with a generic client-facing message.
    #[must_use]
    pub const fn store(context: &'static str, source: StoreError) -> Self {
        Self::StoreUnavailable {
            context,
            source,
            expose_detail: false,
        }
    }

    /// Allow the store error text into the response body.
    #[must_use]
    pub fn with_detail(self, expose: bool) -> Self {
        match self {
            Self::StoreUnavailable {
                context, source, ..
            } => Self::StoreUnavailable {
                context,
                source,
                expose_detail: expose,
            },
            other => other,
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::StoreUnavailable { source, .. } = &self {
            let event_id = sentry::capture_error(source);
            tracing::error!(
                error = %source,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Raw store errors never reach clients outside development
        let body = match &self {
            Self::StoreUnavailable {
                context,
                source,
                expose_detail: true,
            } => json!({ "error": context, "detail": source.to_string() }),
            Self::StoreUnavailable { context, .. } => json!({ "error": context }),
            Self::NotFound(what) => json!({ "error": format!("{what} not found") }),
            Self::BadRequest(msg) => json!({ "error": msg }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("Product".to_string());
        assert_eq!(err.to_string(), "Not found: Product");

        let err = ApiError::BadRequest("invalid id".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid id");
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::store("x", StoreError::Unavailable("down".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_store_error_body_is_generic() {
        let err = ApiError::store(
            "Failed to fetch products",
            StoreError::Unavailable("password authentication failed".to_string()),
        );
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch products" }));
    }

    #[tokio::test]
    async fn test_store_error_detail_in_development() {
        let err = ApiError::store(
            "Failed to fetch products",
            StoreError::Unavailable("pool timed out".to_string()),
        )
        .with_detail(true);
        let (_, body) = body_json(err).await;
        assert_eq!(body["error"], "Failed to fetch products");
        assert!(body["detail"].as_str().unwrap().contains("pool timed out"));
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_json(ApiError::NotFound("Product".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Product not found" }));
    }
}
