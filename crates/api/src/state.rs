//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::Environment;
use crate::db::CatalogStore;
use crate::error::ApiError;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog store and the deployment environment.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn CatalogStore>,
    environment: Environment,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `store` - Catalog store the handlers read from
    /// * `environment` - Controls error detail in 5xx bodies
    pub fn new(store: impl CatalogStore, environment: Environment) -> Self {
        Self::from_shared(Arc::new(store), environment)
    }

    /// Create state over an already shared store.
    #[must_use]
    pub fn from_shared(store: Arc<dyn CatalogStore>, environment: Environment) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, environment }),
        }
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn store(&self) -> &dyn CatalogStore {
        self.inner.store.as_ref()
    }

    /// Get the deployment environment.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.inner.environment
    }

    /// Map a store failure to a response error, honouring the environment's
    /// detail policy.
    #[must_use]
    pub fn store_error(&self, context: &'static str, source: crate::db::StoreError) -> ApiError {
        ApiError::store(context, source).with_detail(!self.inner.environment.is_production())
    }
}
