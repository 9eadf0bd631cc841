//! End-to-end test harness for the Stride storefront.
//!
//! Each [`TestContext`] writes a catalog to a fresh temp directory, serves
//! the storefront router on an ephemeral loopback port and hands out
//! cookie-keeping `reqwest` clients. Nothing external is required:
//!
//! ```bash
//! cargo test -p stride-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use std::path::{Path, PathBuf};

use reqwest::{Client, redirect};
use stride_core::catalog::CatalogBackend;
use stride_core::{Product, ProductId, Review};
use stride_storefront::config::StorefrontConfig;
use stride_storefront::db::JsonFileBackend;
use stride_storefront::state::AppState;
use tokio::task::JoinHandle;

/// A running storefront with its own catalog file.
pub struct TestContext {
    /// Client with a cookie store that does not follow redirects.
    pub client: Client,
    base_url: String,
    catalog_dir: PathBuf,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a storefront over [`sample_catalog`].
    pub async fn start() -> Self {
        Self::with_catalog(&sample_catalog()).await
    }

    /// Start a storefront over `products`.
    pub async fn with_catalog(products: &[Product]) -> Self {
        let catalog_dir = std::env::temp_dir().join(format!("stride-it-{}", uuid::Uuid::new_v4()));
        let catalog_path = catalog_dir.join("products.json");
        JsonFileBackend::new(&catalog_path)
            .save(products)
            .expect("Failed to write test catalog");

        let mut config = StorefrontConfig::for_catalog(&catalog_path);
        config.static_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/static");

        let app = stride_storefront::app(AppState::from_config(config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            client: visitor(),
            base_url: format!("http://{addr}"),
            catalog_dir,
            server,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// The catalog as currently written on disk.
    #[must_use]
    pub fn stored_catalog(&self) -> Vec<Product> {
        JsonFileBackend::new(self.catalog_dir.join("products.json"))
            .load()
            .expect("Failed to read test catalog")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
        let _ = std::fs::remove_dir_all(&self.catalog_dir);
    }
}

/// A fresh visitor: own cookie jar, redirects left to the test.
#[must_use]
pub fn visitor() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Six shoes across three brands, three genders and three categories.
///
/// | id | brand  | gender | category | price  |
/// |----|--------|--------|----------|--------|
/// | 1  | Nike   | Male   | Running  | 100.00 |
/// | 2  | Adidas | Female | Running  | 200.00 |
/// | 3  | Nike   | Male   | Walking  | 150.00 |
/// | 4  | Asics  | Female | Tennis   | 80.00  |
/// | 5  | Adidas | Unisex | Hiking   | 120.00 |
/// | 6  | Asics  | Male   | Running  | 100.00 |
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    let shoe = |id: i32, name: &str, price: &str, brand: &str, gender: &str, category: &str| {
        Product::new(
            ProductId::new(id),
            name,
            price.parse().expect("valid sample price"),
        )
        .with_brand(brand)
        .with_gender(gender)
        .with_category(category)
        .with_description(format!("{name} by {brand}"))
    };

    vec![
        shoe(1, "Pegasus", "100.00", "Nike", "Male", "Running").with_reviews(vec![
            Review::new(5, "Fast and light", "Priya"),
            Review::new(4, "A bit narrow", "Tom"),
        ]),
        shoe(2, "Ultraboost", "200.00", "Adidas", "Female", "Running"),
        shoe(3, "Air Walker", "150.00", "Nike", "Male", "Walking"),
        shoe(4, "Court Ace", "80.00", "Asics", "Female", "Tennis"),
        shoe(5, "Terrex", "120.00", "Adidas", "Unisex", "Hiking"),
        shoe(6, "Kayano", "100.00", "Asics", "Male", "Running"),
    ]
}

/// The HTML following the first occurrence of `marker`, or `""`.
#[must_use]
pub fn section_after<'a>(html: &'a str, marker: &str) -> &'a str {
    html.find(marker)
        .and_then(|start| html.get(start..))
        .unwrap_or("")
}
