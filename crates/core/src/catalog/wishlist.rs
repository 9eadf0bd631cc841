//! Visitor wishlist.
//!
//! The wishlist travels in a cookie as a JSON array of product identifiers.
//! A missing or malformed token reads as an empty wishlist.

use crate::types::{Product, ProductId};

/// Cookie holding the wishlist token.
pub const WISHLIST_COOKIE_NAME: &str = "Wishlist";

/// How long the wishlist cookie is kept by the browser.
pub const WISHLIST_RETENTION_DAYS: i64 = 30;

/// Saved product identifiers in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Parse a cookie token; anything unparseable yields an empty wishlist.
    ///
    /// Repeated ids keep their first position only.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token.is_empty() {
            return Self::new();
        }

        let Ok(stored) = serde_json::from_str::<Vec<ProductId>>(token) else {
            return Self::new();
        };

        let mut wishlist = Self::new();
        for id in stored {
            wishlist.add(id);
        }
        wishlist
    }

    /// Encode as a cookie token.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_token(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.ids)
    }

    /// Add `id` unless already present. Returns `true` if the list changed.
    pub fn add(&mut self, id: ProductId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id` if present. Returns `true` if the list changed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        match self.ids.iter().position(|&existing| existing == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Saved products that exist in the catalog, in catalog order.
    #[must_use]
    pub fn resolve<'a>(&self, catalog: &'a [Product]) -> Vec<&'a Product> {
        super::resolve_ids(&self.ids, catalog)
    }
}
