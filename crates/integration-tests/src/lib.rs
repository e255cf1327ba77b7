//! Integration tests for Way2Rare.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory tests (no services needed)
//! cargo test -p way2rare-integration-tests
//!
//! # Include PostgreSQL-backed tests
//! CATALOG_DATABASE_URL=postgres://localhost/way2rare_test \
//!     cargo test -p way2rare-integration-tests -- --include-ignored
//! ```
//!
//! # Test Categories
//!
//! - `catalog_pipeline` - API → client → projector over the in-memory store
//! - `postgres_store` - Seed and read back through `PostgreSQL`

use std::net::SocketAddr;

use tokio::net::TcpListener;
use url::Url;

use way2rare_api::config::Environment;
use way2rare_api::db::CatalogStore;
use way2rare_api::state::AppState;

/// A catalog API served on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: Url,
}

impl TestServer {
    /// Serve the full API router over `store`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind.
    pub async fn start(store: impl CatalogStore) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let app = way2rare_api::app(AppState::new(store, Environment::Production), &[]);

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}/")).expect("Valid test URL");
        Self { addr, base_url }
    }

    /// Absolute URL for `path` on this server.
    ///
    /// # Panics
    ///
    /// Panics if `path` cannot be joined onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path.trim_start_matches('/'))
            .expect("Valid test path")
    }
}
