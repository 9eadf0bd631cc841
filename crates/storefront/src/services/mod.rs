//! Business logic services for storefront.
//!
//! # Services
//!
//! - `catalog` - Shared product store with write-through persistence
//! - `recently_viewed` - Per-session recently viewed tracker

pub mod catalog;
pub mod recently_viewed;

pub use catalog::ProductStore;
