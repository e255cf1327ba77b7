//! Way2Rare catalog API library.
//!
//! Read-only HTTP access to the product catalog and gallery. The binary in
//! `main.rs` wires configuration, logging and the store; everything needed
//! to build the router lives here so it can be tested without a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, extract::Request, middleware::from_fn};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router.
///
/// Layers, outermost first: request tracing, request id, CORS.
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(routes::routes())
        .with_state(state)
        .layer(middleware::cors_layer(cors_origins))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{self, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Environment;
    use crate::db::InMemoryCatalogStore;

    fn test_app(store: &InMemoryCatalogStore, environment: Environment) -> Router {
        app(AppState::new(store.clone(), environment), &[])
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_products_in_insertion_order() {
        let store = InMemoryCatalogStore::seeded();
        let (status, body) = get(test_app(&store, Environment::Production), "/api/products").await;

        assert_eq!(status, StatusCode::OK);
        let products = body.as_array().unwrap();
        assert_eq!(products.len(), 5);
        let ids: Vec<&str> = products.iter().map(|p| p["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
        assert_eq!(products[0]["isCurrent"], json!(true));
        assert_eq!(products[1]["price"], json!(25.0));
    }

    #[tokio::test]
    async fn test_product_by_id() {
        let store = InMemoryCatalogStore::seeded();
        let (status, body) = get(test_app(&store, Environment::Production), "/api/products/3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Way2Rare Pullover Hoodie");

        let (status, _) = get(test_app(&store, Environment::Production), "/api/products/0003").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_product_is_404() {
        let store = InMemoryCatalogStore::seeded();
        let (status, body) =
            get(test_app(&store, Environment::Production), "/api/products/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");
    }

    #[tokio::test]
    async fn test_malformed_id_is_400_even_when_store_is_down() {
        let store = InMemoryCatalogStore::seeded();
        store.set_unavailable(true);
        for uri in ["/api/products/abc", "/api/products/-4", "/api/products/0"] {
            let (status, _) = get(test_app(&store, Environment::Production), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_500() {
        let store = InMemoryCatalogStore::seeded();
        store.set_unavailable(true);
        let (status, body) = get(test_app(&store, Environment::Production), "/api/products").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch products" }));
    }

    #[tokio::test]
    async fn test_store_failure_detail_in_development() {
        let store = InMemoryCatalogStore::seeded();
        store.set_unavailable(true);
        let (status, body) = get(test_app(&store, Environment::Development), "/api/gallery").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch gallery");
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_gallery_newest_first() {
        let store = InMemoryCatalogStore::seeded();
        let (status, body) = get(test_app(&store, Environment::Production), "/api/gallery").await;
        assert_eq!(status, StatusCode::OK);
        let posts = body.as_array().unwrap();
        assert_eq!(posts.len(), 8);
        assert_eq!(posts[0]["handle"], "@latecheckout");
        assert_eq!(posts[7]["handle"], "@slattinson");
        assert!(posts[0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_api_health() {
        let store = InMemoryCatalogStore::seeded();
        let (status, body) = get(test_app(&store, Environment::Production), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "status": "ok", "message": "Server is running and DB is connected" })
        );

        store.set_unavailable(true);
        let (status, body) = get(test_app(&store, Environment::Production), "/api/health").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "DB connection failed");
    }

    #[tokio::test]
    async fn test_liveness_ignores_store() {
        let store = InMemoryCatalogStore::seeded();
        store.set_unavailable(true);
        let response = test_app(&store, Environment::Production)
            .oneshot(
                http::Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
