//! Catalog file management.
//!
//! Unlike the web app, these commands refuse to run against a catalog file
//! that exists but cannot be parsed.

use std::path::Path;

use stride_core::{Price, PriceError, Product, ProductId, Review};
use stride_storefront::db::{JsonFileBackend, RepositoryError};
use stride_storefront::services::ProductStore;
use thiserror::Error;
use tracing::info;

/// Errors from catalog commands.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error("a product with id {0} already exists")]
    DuplicateId(ProductId),

    #[error("no product with id {0}")]
    UnknownProduct(ProductId),
}

/// Fields for a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub brand: String,
    pub gender: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
}

/// Open the catalog strictly. A missing file is only acceptable when the
/// command is about to create it.
fn open(path: &Path, allow_missing: bool) -> Result<ProductStore, RepositoryError> {
    let backend = JsonFileBackend::new(path);
    match ProductStore::load_strict(backend.clone()) {
        Ok(store) => Ok(store),
        Err(e) if allow_missing && e.is_not_found() => Ok(ProductStore::empty(backend)),
        Err(e) => Err(e),
    }
}

/// Summarize the catalog.
///
/// # Errors
///
/// Returns an error if the catalog file is missing or malformed.
pub fn show(path: &Path) -> Result<(), CatalogCommandError> {
    let store = open(path, false)?;
    let products = store.all();
    let reviews: usize = products.iter().map(|p| p.reviews.len()).sum();

    info!(
        path = %path.display(),
        products = products.len(),
        reviews,
        "Catalog loaded"
    );
    for product in &products {
        info!(
            id = %product.id,
            brand = %product.brand,
            price = %product.price,
            rating = %format!("{:.1}", product.average_rating()),
            "{}",
            product.name
        );
    }
    Ok(())
}

/// List distinct brands.
///
/// # Errors
///
/// Returns an error if the catalog file is missing or malformed.
pub fn brands(path: &Path) -> Result<Vec<String>, CatalogCommandError> {
    let brands = open(path, false)?.all_brands();
    for brand in &brands {
        info!("{brand}");
    }
    Ok(brands)
}

/// Append a product, creating the catalog file if needed.
///
/// # Errors
///
/// Returns an error on a duplicate id, an invalid or negative price, or a
/// catalog file that cannot be read or written.
pub fn add(path: &Path, new: NewProduct) -> Result<(), CatalogCommandError> {
    let store = open(path, true)?;
    let id = ProductId::new(new.id);

    if store.get_by_id(id).is_some() {
        return Err(CatalogCommandError::DuplicateId(id));
    }

    let price: Price = new.price.parse()?;
    let product = Product::new(id, new.name, price)
        .with_brand(new.brand)
        .with_gender(new.gender)
        .with_category(new.category)
        .with_description(new.description)
        .with_image_url(new.image_url);

    store.add(product)?;
    info!(id = %id, total = store.len(), "Product added");
    Ok(())
}

/// Append a review to an existing product.
///
/// # Errors
///
/// Returns an error if the product does not exist or the catalog file cannot
/// be read or written.
pub fn review(
    path: &Path,
    product_id: i32,
    rating: i32,
    comment: &str,
    reviewer: &str,
) -> Result<(), CatalogCommandError> {
    let store = open(path, false)?;
    let id = ProductId::new(product_id);

    if !store.add_review(id, Review::new(rating, comment, reviewer))? {
        return Err(CatalogCommandError::UnknownProduct(id));
    }

    info!(
        id = %id,
        average = %format!("{:.1}", store.average_rating(id)),
        "Review added"
    );
    Ok(())
}
