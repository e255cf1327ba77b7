//! In-process catalog store.
//!
//! Backs the API under `CATALOG_STORE=memory` and in the router tests. Holds
//! the same records the seed step would write, keyed the way `PostgreSQL`
//! would key them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use way2rare_core::seed::{self, GallerySeed};
use way2rare_core::{GalleryPost, GalleryPostId, Product, ProductId, sort_newest_first};

use super::{CatalogStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    products: Vec<Product>,
    gallery: Vec<GalleryPost>,
    unavailable: AtomicBool,
}

/// Catalog store holding its records in memory.
///
/// Cloning is cheap and clones share state, so a test can keep a handle and
/// flip [`set_unavailable`](Self::set_unavailable) after the router is built.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStore {
    inner: Arc<Inner>,
}

impl InMemoryCatalogStore {
    /// Build a store from products and gallery seeds.
    ///
    /// Products are re-keyed `1..=n` in the given order. Gallery posts are
    /// keyed the same way and stamped one second apart from `epoch`, so the
    /// last seed is the newest.
    #[must_use]
    pub fn new(products: Vec<Product>, gallery: &[GallerySeed], epoch: DateTime<Utc>) -> Self {
        let products = (1_i32..)
            .zip(products)
            .map(|(key, product)| Product {
                id: ProductId::from(key),
                ..product
            })
            .collect();

        let gallery = (1_i32..)
            .zip(gallery)
            .map(|(key, post)| GalleryPost {
                id: GalleryPostId::new(key),
                image: post.image.clone(),
                handle: post.handle.clone(),
                created_at: epoch + Duration::seconds(i64::from(key)),
            })
            .collect();

        Self {
            inner: Arc::new(Inner {
                products,
                gallery,
                unavailable: AtomicBool::new(false),
            }),
        }
    }

    /// A store holding the bundled launch catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed::products(), &seed::gallery(), Utc::now())
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.inner.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        self.check()?;
        Ok(self.inner.products.clone())
    }

    async fn get_product(&self, key: i32) -> Result<Option<Product>, StoreError> {
        self.check()?;
        Ok(self
            .inner
            .products
            .iter()
            .find(|p| p.id.store_key() == Ok(key))
            .cloned())
    }

    async fn list_gallery(&self) -> Result<Vec<GalleryPost>, StoreError> {
        self.check()?;
        let mut posts = self.inner.gallery.clone();
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}
