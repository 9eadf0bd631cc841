//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /privacy                - Privacy page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Listing (?sortBy=&maxPrice=&brand=&gender=)
//! GET  /products/{id}          - Detail (records the view in the session)
//! POST /products/{id}/reviews  - Add review, redirects to detail
//!
//! # Wishlist (cookie)
//! GET  /wishlist               - Wishlist page
//! POST /wishlist/add           - Add product, redirects to listing
//! POST /wishlist/remove        - Remove product, redirects to wishlist
//!
//! # JSON API
//! GET  /api/products           - Listing, same query parameters
//! GET  /api/products/{id}      - Detail with rating and related products
//! GET  /api/brands             - Distinct brands
//! ```

pub mod api;
pub mod home;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/reviews", post(products::add_review))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::index))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(api::products::list))
        .route("/products/{id}", get(api::products::show))
        .route("/brands", get(api::products::brands))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/privacy", get(home::privacy))
        .nest("/products", product_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/api", api_routes())
}
