//! Storefront application state.
//!
//! [`Storefront`] owns the unified product collection and the shared search
//! state. The collection lives in a [`Catalog`] snapshot that is only ever
//! replaced whole, so every reader sees one consistent version. Views either
//! read the current snapshot or [`subscribe`](Storefront::subscribe) to be
//! woken on replacement.
//!
//! # Lifecycle
//!
//! ```text
//! Storefront::new ──► Ready(seed), loading
//!        │
//!        └─ mount() ──► no API URL ─────────► Ready(seed)
//!                   └─► fetch ok, non-empty ► Ready(api)
//!                   └─► fetch failed/empty ─► Failed(reason), last good data kept
//! ```
//!
//! Dropping the [`Mount`] before the fetch resolves discards the result and
//! clears `loading`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use url::Url;

use way2rare_core::{CatalogQuery, Price, Product, ProductId, categories, seed};

use crate::client::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::FetchError;
use crate::view::ProductView;

/// Number of products in the vault view when no limit is given.
pub const DEFAULT_VAULT_LIMIT: usize = 10;

/// Where the current product collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Api,
    Seed,
}

/// Resolution status of the product collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CatalogStatus {
    /// Nothing resolved yet.
    ///
    /// A [`Storefront`] never reports this; it starts at `Ready(seed)`. Only
    /// [`Catalog::default`] carries it, for consumers that hold a snapshot
    /// before any storefront exists.
    Loading,
    /// Products are available from `source`.
    Ready { source: CatalogSource },
    /// The fetch failed; the last good products from `source` are shown.
    /// `reason` is diagnostic only.
    Failed {
        source: CatalogSource,
        reason: String,
    },
}

impl CatalogStatus {
    /// Source of the products shown in this status, if any.
    #[must_use]
    pub const fn source(&self) -> Option<CatalogSource> {
        match self {
            Self::Loading => None,
            Self::Ready { source } | Self::Failed { source, .. } => Some(*source),
        }
    }
}

/// One consistent view of the product collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub products: Arc<[Product]>,
    pub status: CatalogStatus,
    /// A fetch is outstanding.
    pub loading: bool,
}

/// An empty, unresolved snapshot.
impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: Arc::from(Vec::new()),
            status: CatalogStatus::Loading,
            loading: true,
        }
    }
}

impl Catalog {
    fn seeded(loading: bool) -> Self {
        Self {
            products: seed::products().into(),
            status: CatalogStatus::Ready {
                source: CatalogSource::Seed,
            },
            loading,
        }
    }

    /// Diagnostic message from the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            CatalogStatus::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Search query and panel visibility, shared by the navigation bar and the
/// search panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub visible: bool,
}

/// Storefront application state.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    catalog: watch::Sender<Catalog>,
    search: watch::Sender<SearchState>,
    /// Bumped on every mount; only the newest mount may publish.
    generation: AtomicU64,
}

impl Storefront {
    /// Create the state, already showing the seed catalog.
    ///
    /// `loading` stays true until a [`mount`](Self::mount) resolves.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let (catalog, _) = watch::channel(Catalog::seeded(true));
        let (search, _) = watch::channel(SearchState::default());

        Self {
            inner: Arc::new(StorefrontInner {
                config,
                catalog,
                search,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Resolve the catalog against the configured API.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use = "dropping the Mount discards the fetch"]
    pub fn mount(&self) -> Mount {
        self.mount_at(self.inner.config.api_url.clone())
    }

    /// Resolve the catalog against `api_url` instead of the configured one.
    ///
    /// Issues a fresh fetch; results from earlier mounts are ignored from
    /// here on. With no URL the seed catalog is published without any
    /// network call.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use = "dropping the Mount discards the fetch"]
    pub fn mount_at(&self, api_url: Option<Url>) -> Mount {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let cancelled = Arc::new(AtomicBool::new(false));

        let Some(base) = api_url else {
            info!("No API URL configured, using seed catalog");
            self.publish(generation, &cancelled, |_| Catalog::seeded(false));
            return Mount {
                storefront: self.clone(),
                generation,
                cancelled,
                task: None,
            };
        };

        self.inner.catalog.send_modify(|catalog| catalog.loading = true);

        let this = self.clone();
        let flag = Arc::clone(&cancelled);
        let task = tokio::spawn(async move {
            let result = this.resolve(&base).await;
            this.publish(generation, &flag, |current| match result {
                Ok(products) => Catalog {
                    products,
                    status: CatalogStatus::Ready {
                        source: CatalogSource::Api,
                    },
                    loading: false,
                },
                Err(e) => Self::fallback(current, &e),
            });
        });

        Mount {
            storefront: self.clone(),
            generation,
            cancelled,
            task: Some(task),
        }
    }

    async fn resolve(&self, base: &Url) -> Result<Arc<[Product]>, FetchError> {
        let result = match CatalogClient::new(base, self.inner.config.fetch_timeout) {
            Ok(client) => client.fetch_products().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded from API");
                Ok(products.into())
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed, keeping last good data");
                Err(e)
            }
        }
    }

    /// Keep whatever is on display; products fetched by an earlier mount
    /// survive a later failure.
    fn fallback(current: &Catalog, err: &FetchError) -> Catalog {
        let (source, products) = match current.status.source() {
            Some(CatalogSource::Api) => (CatalogSource::Api, Arc::clone(&current.products)),
            _ => (CatalogSource::Seed, seed::products().into()),
        };

        Catalog {
            products,
            status: CatalogStatus::Failed {
                source,
                reason: err.to_string(),
            },
            loading: false,
        }
    }

    /// Replace the snapshot unless the mount was dropped or superseded.
    fn publish(
        &self,
        generation: u64,
        cancelled: &AtomicBool,
        next: impl FnOnce(&Catalog) -> Catalog,
    ) {
        self.inner.catalog.send_if_modified(|current| {
            if cancelled.load(Ordering::SeqCst) || !self.is_current(generation) {
                return false;
            }
            *current = next(current);
            true
        });
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }

    /// The current snapshot.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        self.inner.catalog.borrow().clone()
    }

    /// Watch for snapshot replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Catalog> {
        self.inner.catalog.subscribe()
    }

    /// The current product collection.
    #[must_use]
    pub fn products(&self) -> Arc<[Product]> {
        Arc::clone(&self.inner.catalog.borrow().products)
    }

    /// Whether a fetch is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.catalog.borrow().loading
    }

    /// Diagnostic message from the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.inner.catalog.borrow().error().map(String::from)
    }

    /// Currency prefix for prices.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.inner.config.currency
    }

    /// Flat delivery fee.
    #[must_use]
    pub fn delivery_fee(&self) -> Price {
        self.inner.config.delivery_fee
    }

    /// Current search state.
    #[must_use]
    pub fn search(&self) -> SearchState {
        self.inner.search.borrow().clone()
    }

    /// Watch for search state changes.
    #[must_use]
    pub fn subscribe_search(&self) -> watch::Receiver<SearchState> {
        self.inner.search.subscribe()
    }

    /// Replace the search query.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.inner.search.send_if_modified(|search| {
            if search.query == query {
                return false;
            }
            search.query = query;
            true
        });
    }

    /// Show or hide the search panel.
    pub fn set_show_search(&self, visible: bool) {
        self.inner.search.send_if_modified(|search| {
            let changed = search.visible != visible;
            search.visible = visible;
            changed
        });
    }

    /// Flip search panel visibility and return the new value.
    pub fn toggle_search(&self) -> bool {
        let mut visible = false;
        self.inner.search.send_modify(|search| {
            search.visible = !search.visible;
            visible = search.visible;
        });
        visible
    }

    /// Filter and sort the current collection.
    ///
    /// The shared search query applies when `query.search` is empty.
    #[must_use]
    pub fn project(&self, query: &CatalogQuery) -> Vec<Product> {
        let products = self.products();
        if query.search.trim().is_empty() {
            let search = self.inner.search.borrow().query.clone();
            if !search.trim().is_empty() {
                let query = CatalogQuery {
                    search,
                    ..query.clone()
                };
                return query.apply(&products);
            }
        }
        query.apply(&products)
    }

    /// Featured products (`isCurrent`), in collection order.
    #[must_use]
    pub fn featured(&self) -> Vec<Product> {
        self.products()
            .iter()
            .filter(|p| p.is_current)
            .cloned()
            .collect()
    }

    /// The first `limit` products.
    #[must_use]
    pub fn vault(&self, limit: usize) -> Vec<Product> {
        self.products().iter().take(limit).cloned().collect()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        categories(&self.products())
    }

    /// Look up a product by id.
    ///
    /// Exact id match first; failing that, ids naming the same store key
    /// match (`"0003"` finds the API's `"3"`).
    #[must_use]
    pub fn find_product(&self, id: &ProductId) -> Option<Product> {
        let products = self.products();
        products
            .iter()
            .find(|p| &p.id == id)
            .or_else(|| {
                let key = id.store_key().ok()?;
                products.iter().find(|p| p.id.store_key() == Ok(key))
            })
            .cloned()
    }

    /// Display model for `product` using this storefront's currency and
    /// placeholder image.
    #[must_use]
    pub fn view(&self, product: &Product) -> ProductView {
        ProductView::new(product, &self.inner.config)
    }
}

/// An active catalog resolution.
///
/// Dropping it before the fetch resolves discards the result. The products
/// on display are left alone; `loading` is cleared if no newer mount has
/// taken over.
pub struct Mount {
    storefront: Storefront,
    generation: u64,
    cancelled: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Mount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mount")
            .field("generation", &self.generation)
            .field("pending", &self.task.is_some())
            .finish_non_exhaustive()
    }
}

impl Mount {
    /// Wait for the fetch to finish and its result to be published.
    pub async fn resolved(mut self) {
        if let Some(task) = self.task.take() {
            // A panicked or aborted task publishes nothing; the snapshot stays.
            let _ = task.await;
        }
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            self.cancelled.store(true, Ordering::SeqCst);
            task.abort();

            let storefront = &self.storefront;
            storefront.inner.catalog.send_if_modified(|catalog| {
                if !catalog.loading || !storefront.is_current(self.generation) {
                    return false;
                }
                catalog.loading = false;
                true
            });
        }
    }
}
