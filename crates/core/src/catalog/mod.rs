//! Catalog logic over an in-memory product collection.
//!
//! Everything here is a pure function or a small value type; the storefront
//! binds these to its product store, the session and the wishlist cookie.
//!
//! - [`query`] - Filter by price, brand and gender; sort by price
//! - [`related`] - Products sharing a category or brand
//! - [`recently_viewed`] - Capped, most-recent-first list of viewed products
//! - [`wishlist`] - Deduplicated list of saved products and its cookie token
//! - [`backend`] - Load/save seam for catalog persistence

pub mod backend;
pub mod query;
pub mod recently_viewed;
pub mod related;
pub mod wishlist;

pub use backend::{CatalogBackend, MemoryBackend};
pub use query::{CatalogQuery, SortOrder, distinct_brands};
pub use recently_viewed::RecentlyViewed;
pub use related::related_products;
pub use wishlist::Wishlist;

use crate::types::{Product, ProductId};

/// Resolve identifiers against the catalog, keeping catalog order and
/// silently dropping identifiers that match no product.
#[must_use]
pub fn resolve_ids<'a>(ids: &[ProductId], catalog: &'a [Product]) -> Vec<&'a Product> {
    catalog.iter().filter(|p| ids.contains(&p.id)).collect()
}
