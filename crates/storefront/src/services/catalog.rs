//! Process-wide product store.
//!
//! Holds the catalog in memory behind a lock and writes the full collection
//! back through its [`CatalogBackend`] after every mutation.
//!
//! A mutation takes the writer mutex, changes the collection and snapshots it
//! under the write lock, then saves the snapshot with only the writer mutex
//! held. Readers never wait on file I/O, and saves land in mutation order.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use stride_core::catalog::{self, CatalogBackend, CatalogQuery};
use stride_core::{Product, ProductId, Review};
use tracing::instrument;

use crate::db::JsonFileBackend;

/// In-memory catalog with write-through persistence.
#[derive(Debug)]
pub struct ProductStore<B: CatalogBackend = JsonFileBackend> {
    backend: B,
    products: RwLock<Vec<Product>>,
    writer: Mutex<()>,
}

impl<B: CatalogBackend> ProductStore<B> {
    /// Load the catalog from `backend`.
    ///
    /// A missing or unreadable document yields an empty catalog; the failure
    /// is logged and never propagated.
    pub fn load_or_default(backend: B) -> Self {
        let products = match backend.load() {
            Ok(products) => {
                tracing::info!(count = products.len(), "Catalog loaded");
                products
            }
            Err(e) => {
                tracing::warn!(error = %e, "Catalog unavailable, starting with an empty catalog");
                Vec::new()
            }
        };

        Self::with_products(backend, products)
    }

    /// Load the catalog from `backend`, failing on any load error.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the document is missing or malformed.
    pub fn load_strict(backend: B) -> Result<Self, B::Error> {
        let products = backend.load()?;
        Ok(Self::with_products(backend, products))
    }

    /// An empty catalog that will be written to `backend` on first mutation.
    pub const fn empty(backend: B) -> Self {
        Self::with_products(backend, Vec::new())
    }

    const fn with_products(backend: B, products: Vec<Product>) -> Self {
        Self {
            backend,
            products: RwLock::new(products),
            writer: Mutex::new(()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The backend this store persists through.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Snapshot of the whole catalog.
    #[must_use]
    pub fn all(&self) -> Vec<Product> {
        self.read().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// First product with the given identifier.
    #[must_use]
    pub fn get_by_id(&self, id: ProductId) -> Option<Product> {
        self.read().iter().find(|p| p.id == id).cloned()
    }

    /// Products matching `query`, in result order.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<Product> {
        query.apply(&self.read()).into_iter().cloned().collect()
    }

    /// Distinct brands, sorted.
    #[must_use]
    pub fn all_brands(&self) -> Vec<String> {
        catalog::distinct_brands(&self.read())
    }

    /// Reviews for a product; empty when the product does not exist.
    #[must_use]
    pub fn reviews_for(&self, id: ProductId) -> Vec<Review> {
        self.read()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.reviews.clone())
            .unwrap_or_default()
    }

    /// Mean rating of a product; `0.0` when it is absent or unreviewed.
    #[must_use]
    pub fn average_rating(&self, id: ProductId) -> f64 {
        self.read()
            .iter()
            .find(|p| p.id == id)
            .map_or(0.0, Product::average_rating)
    }

    /// Up to five products sharing a category or brand with `id`.
    #[must_use]
    pub fn related(&self, id: ProductId) -> Vec<Product> {
        let products = self.read();
        products
            .iter()
            .find(|p| p.id == id)
            .map(|source| {
                catalog::related_products(source, &products)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolve identifiers to products in catalog order, dropping unknown ids.
    #[must_use]
    pub fn resolve(&self, ids: &[ProductId]) -> Vec<Product> {
        catalog::resolve_ids(ids, &self.read())
            .into_iter()
            .cloned()
            .collect()
    }

    /// Append a product and persist the catalog.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the catalog cannot be written. The product
    /// stays in memory.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&self, product: Product) -> Result<(), B::Error> {
        let _writer = self.lock_writer();
        let snapshot = {
            let mut products = self.write();
            products.push(product);
            products.clone()
        };
        self.backend.save(&snapshot)
    }

    /// Append a review to a product and persist the catalog.
    ///
    /// Returns `Ok(false)` without writing when the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the catalog cannot be written. The review
    /// stays in memory.
    #[instrument(skip(self, review), fields(rating = review.rating))]
    pub fn add_review(&self, product_id: ProductId, review: Review) -> Result<bool, B::Error> {
        let _writer = self.lock_writer();
        let snapshot = {
            let mut products = self.write();
            let Some(product) = products.iter_mut().find(|p| p.id == product_id) else {
                tracing::debug!("Review for unknown product ignored");
                return Ok(false);
            };
            product.reviews.push(review);
            products.clone()
        };

        self.backend.save(&snapshot)?;
        Ok(true)
    }

    /// Empty the in-memory catalog without touching the backing document.
    pub fn clear(&self) {
        self.write().clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::{Arc, mpsc};
    use std::thread;
    use std::time::Duration;

    use stride_core::Price;
    use stride_core::catalog::{MemoryBackend, SortOrder};

    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(ProductId::new(1), "Pegasus", "100".parse().unwrap())
                .with_brand("Nike")
                .with_category("Running"),
            Product::new(ProductId::new(2), "Gazelle", "200".parse().unwrap())
                .with_brand("Adidas")
                .with_category("Casual"),
            Product::new(ProductId::new(3), "Ultraboost", "150".parse().unwrap())
                .with_brand("Adidas")
                .with_category("Running"),
        ]
    }

    fn store() -> ProductStore<MemoryBackend> {
        ProductStore::load_or_default(MemoryBackend::with_products(catalog()))
    }

    #[derive(Debug, thiserror::Error)]
    #[error("backend unavailable")]
    struct Broken;

    struct BrokenBackend;

    impl CatalogBackend for BrokenBackend {
        type Error = Broken;

        fn load(&self) -> Result<Vec<Product>, Self::Error> {
            Err(Broken)
        }

        fn save(&self, _products: &[Product]) -> Result<(), Self::Error> {
            Err(Broken)
        }
    }

    /// Holds every save until the test releases it.
    struct GatedBackend {
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl CatalogBackend for GatedBackend {
        type Error = Broken;

        fn load(&self) -> Result<Vec<Product>, Self::Error> {
            Ok(catalog())
        }

        fn save(&self, _products: &[Product]) -> Result<(), Self::Error> {
            self.gate
                .lock()
                .unwrap()
                .recv_timeout(Duration::from_secs(5))
                .map_err(|_| Broken)
        }
    }

    #[test]
    fn test_load_failure_yields_empty_catalog() {
        let store = ProductStore::load_or_default(BrokenBackend);
        assert!(store.is_empty());
        assert!(ProductStore::load_strict(BrokenBackend).is_err());
    }

    #[test]
    fn test_get_by_id() {
        let store = store();
        assert_eq!(store.get_by_id(ProductId::new(2)).unwrap().name, "Gazelle");
        assert!(store.get_by_id(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_add_appends_and_persists() {
        let store = store();
        store
            .add(Product::new(ProductId::new(4), "Samba", Price::default()))
            .unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.backend().save_count(), 1);
        assert_eq!(store.backend().stored()[3].name, "Samba");
    }

    #[test]
    fn test_add_review_persists_and_updates_average() {
        let store = store();
        let id = ProductId::new(1);

        assert!(store.add_review(id, Review::new(5, "Fast", "Kim")).unwrap());
        assert!(store.add_review(id, Review::new(4, "Good", "Lee")).unwrap());

        assert_eq!(store.reviews_for(id).len(), 2);
        assert!((store.average_rating(id) - 4.5).abs() < f64::EPSILON);
        assert_eq!(store.backend().stored()[0].reviews.len(), 2);
    }

    #[test]
    fn test_add_review_to_unknown_product_is_noop() {
        let store = store();
        let added = store
            .add_review(ProductId::new(99), Review::new(5, "", ""))
            .unwrap();

        assert!(!added);
        assert_eq!(store.backend().save_count(), 0);
        assert!(store.reviews_for(ProductId::new(99)).is_empty());
        assert!(store.average_rating(ProductId::new(99)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failed_write_keeps_in_memory_change() {
        let store = ProductStore::with_products(BrokenBackend, catalog());

        assert!(
            store
                .add_review(ProductId::new(1), Review::new(3, "", ""))
                .is_err()
        );
        assert_eq!(store.reviews_for(ProductId::new(1)).len(), 1);
    }

    #[test]
    fn test_reads_proceed_while_a_save_is_pending() {
        let (release, gate) = mpsc::channel();
        let store = Arc::new(ProductStore::load_or_default(GatedBackend {
            gate: Mutex::new(gate),
        }));

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store.add(Product::new(ProductId::new(4), "Samba", Price::default()))
            })
        };

        while store.len() < 4 {
            thread::yield_now();
        }
        assert_eq!(store.get_by_id(ProductId::new(4)).unwrap().name, "Samba");

        release.send(()).unwrap();
        assert!(writer.join().unwrap().is_ok());
    }

    #[test]
    fn test_related_excludes_source() {
        let store = store();
        let related: Vec<i32> = store
            .related(ProductId::new(3))
            .iter()
            .map(|p| p.id.as_i32())
            .collect();

        assert_eq!(related, vec![1, 2]);
        assert!(store.related(ProductId::new(99)).is_empty());
    }

    #[test]
    fn test_query_and_brands() {
        let store = store();
        let query = CatalogQuery {
            brand: Some("adidas".to_string()),
            sort: SortOrder::PriceAscending,
            ..CatalogQuery::default()
        };

        let names: Vec<String> = store.query(&query).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Ultraboost", "Gazelle"]);
        assert_eq!(store.all_brands(), vec!["Adidas", "Nike"]);
    }

    #[test]
    fn test_resolve_keeps_catalog_order() {
        let store = store();
        let resolved: Vec<i32> = store
            .resolve(&[ProductId::new(3), ProductId::new(42), ProductId::new(1)])
            .iter()
            .map(|p| p.id.as_i32())
            .collect();

        assert_eq!(resolved, vec![1, 3]);
    }

    #[test]
    fn test_clear_does_not_write() {
        let store = store();
        store.clear();

        assert!(store.all().is_empty());
        assert_eq!(store.backend().save_count(), 0);
        assert_eq!(store.backend().stored().len(), 3);
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("stride-store-{}", uuid::Uuid::new_v4()));
        let path = dir.join("products.json");

        let store = ProductStore::load_or_default(JsonFileBackend::new(&path));
        assert!(store.is_empty());

        store
            .add(Product::new(ProductId::new(7), "Trail", "65".parse().unwrap()))
            .unwrap();
        store
            .add_review(ProductId::new(7), Review::new(4, "Grippy", "Max"))
            .unwrap();

        let reloaded = ProductStore::load_strict(JsonFileBackend::new(&path)).unwrap();
        assert_eq!(reloaded.all(), store.all());

        std::fs::remove_dir_all(dir).unwrap();
    }
}
