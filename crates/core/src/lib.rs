//! Stride Core - Catalog types and logic.
//!
//! This crate provides the domain model shared by every Stride component:
//! - `storefront` - Public catalog site (axum)
//! - `cli` - Command-line tools for catalog maintenance
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no file
//! access, no HTTP, no session handling. Persistence is reached through the
//! [`catalog::CatalogBackend`] trait, implemented by the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Products, reviews, prices and type-safe IDs
//! - [`catalog`] - Filtering, sorting, related products, recently viewed and wishlist

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use types::*;
