//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::JsonFileBackend;
use crate::services::ProductStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; handlers that write the catalog move a clone
/// into a blocking task.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: ProductStore,
}

impl AppState {
    /// Create application state, loading the catalog named by `config`.
    ///
    /// A missing or malformed catalog file starts the shop with no products.
    #[must_use]
    pub fn from_config(config: StorefrontConfig) -> Self {
        let catalog = ProductStore::load_or_default(JsonFileBackend::new(&config.catalog_path));
        Self::new(config, catalog)
    }

    /// Create application state around an already loaded catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: ProductStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product store.
    #[must_use]
    pub fn catalog(&self) -> &ProductStore {
        &self.inner.catalog
    }
}
