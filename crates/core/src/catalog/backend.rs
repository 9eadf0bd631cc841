//! Persistence seam for the product catalog.
//!
//! The catalog is always read and written as a whole: there are no
//! incremental writes. The storefront provides a JSON file implementation;
//! [`MemoryBackend`] keeps the collection in memory for tests and tooling.

use std::convert::Infallible;
use std::sync::{Mutex, PoisonError};

use crate::types::Product;

/// Whole-collection load/save interface for the catalog.
pub trait CatalogBackend: Send + Sync {
    /// Error raised when the backing document cannot be read or written.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the full collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is missing or cannot be parsed.
    fn load(&self) -> Result<Vec<Product>, Self::Error>;

    /// Replace the stored collection with `products`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save(&self, products: &[Product]) -> Result<(), Self::Error>;
}

/// In-memory backend that records every save.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    products: Mutex<Vec<Product>>,
    saves: Mutex<usize>,
}

impl MemoryBackend {
    /// Create a backend pre-populated with `products`.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            saves: Mutex::new(0),
        }
    }

    /// The collection as of the last save (or the initial contents).
    #[must_use]
    pub fn stored(&self) -> Vec<Product> {
        self.products
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times `save` has been called.
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CatalogBackend for MemoryBackend {
    type Error = Infallible;

    fn load(&self) -> Result<Vec<Product>, Self::Error> {
        Ok(self.stored())
    }

    fn save(&self, products: &[Product]) -> Result<(), Self::Error> {
        *self.products.lock().unwrap_or_else(PoisonError::into_inner) = products.to_vec();
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
