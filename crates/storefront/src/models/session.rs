//! Session-related types.

/// Session keys for visitor state.
pub mod keys {
    /// Recently viewed product ids, a JSON array of integers, most recent first.
    pub const RECENTLY_VIEWED: &str = "RecentlyViewed";
}
