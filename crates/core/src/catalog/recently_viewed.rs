//! Recently viewed products for one visitor session.
//!
//! The list is most-recent-first, holds no duplicates and never exceeds
//! [`RECENTLY_VIEWED_CAPACITY`] entries. Viewing a product that is already in
//! the list leaves the order untouched: recency is not refreshed.

use crate::types::{Product, ProductId};

/// Maximum number of tracked products.
pub const RECENTLY_VIEWED_CAPACITY: usize = 3;

/// Capped, most-recent-first list of viewed product identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentlyViewed {
    ids: Vec<ProductId>,
}

impl RecentlyViewed {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Rebuild the tracker from stored identifiers.
    ///
    /// Duplicates after the first occurrence are dropped and the list is cut
    /// to capacity, so a tampered or stale session value still yields a valid
    /// tracker.
    #[must_use]
    pub fn from_ids(stored: Vec<ProductId>) -> Self {
        let mut ids = Vec::with_capacity(RECENTLY_VIEWED_CAPACITY);
        for id in stored {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids.truncate(RECENTLY_VIEWED_CAPACITY);
        Self { ids }
    }

    /// Record a product view. Returns `true` if the list changed.
    pub fn track(&mut self, id: ProductId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }

        self.ids.insert(0, id);
        self.ids.truncate(RECENTLY_VIEWED_CAPACITY);
        true
    }

    /// Tracked identifiers, most recent first.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Tracked products that still exist, in catalog order.
    #[must_use]
    pub fn resolve<'a>(&self, catalog: &'a [Product]) -> Vec<&'a Product> {
        super::resolve_ids(&self.ids, catalog)
    }
}
