//! JSON API handlers.
//!
//! Read-only views of the catalog with the same filtering as the HTML pages.
//! These endpoints do not touch the session or the wishlist cookie.

pub mod products;
