//! Wishlist route handlers.
//!
//! The wishlist lives entirely in the visitor's `Wishlist` cookie; the cookie
//! is only re-issued when an add or remove actually changed it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderValue, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Deserializer};
use stride_core::ProductId;
use stride_core::catalog::Wishlist;
use tracing::instrument;

use super::products::{ProductView, views};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{VisitorWishlist, wishlist_cookie};
use crate::state::AppState;

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/index.html")]
pub struct WishlistTemplate {
    pub products: Vec<ProductView>,
}

/// Add/remove form. A missing or non-numeric id leaves the wishlist alone.
#[derive(Debug, Deserialize)]
pub struct WishlistForm {
    #[serde(default, deserialize_with = "lenient_product_id")]
    pub product_id: Option<ProductId>,
}

fn lenient_product_id<'de, D>(deserializer: D) -> std::result::Result<Option<ProductId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Redirect to `location`, attaching the wishlist cookie when it changed.
fn redirect_with_wishlist(
    state: &AppState,
    location: &str,
    wishlist: &Wishlist,
    changed: bool,
) -> Result<Response> {
    let mut response = Redirect::to(location).into_response();

    if changed {
        let cookie = wishlist_cookie(wishlist, state.config().secure_cookies())
            .map_err(|e| AppError::Internal(format!("wishlist encoding failed: {e}")))?;
        let value = HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| AppError::Internal(format!("wishlist cookie invalid: {e}")))?;
        response.headers_mut().append(SET_COOKIE, value);
    }

    Ok(response)
}

/// Display the wishlist page.
#[instrument(skip(state, wishlist))]
pub async fn index(
    State(state): State<AppState>,
    VisitorWishlist(wishlist): VisitorWishlist,
) -> impl IntoResponse {
    WishlistTemplate {
        products: views(&state.catalog().resolve(wishlist.ids())),
    }
}

/// Add a product to the wishlist and return to the listing.
///
/// The id is not checked against the catalog; unknown ids are dropped when
/// the wishlist page resolves it.
#[instrument(skip(state, wishlist))]
pub async fn add(
    State(state): State<AppState>,
    VisitorWishlist(mut wishlist): VisitorWishlist,
    Form(form): Form<WishlistForm>,
) -> Result<Response> {
    let changed = form.product_id.is_some_and(|id| wishlist.add(id));

    if let Some(id) = form.product_id.filter(|_| changed) {
        tracing::info!(product_id = %id, size = wishlist.len(), "Added to wishlist");
        add_breadcrumb(
            "wishlist",
            "Added to wishlist",
            Some(&[("product_id", &id.to_string())]),
        );
    }

    redirect_with_wishlist(&state, "/products", &wishlist, changed)
}

/// Remove a product from the wishlist and return to the wishlist page.
#[instrument(skip(state, wishlist))]
pub async fn remove(
    State(state): State<AppState>,
    VisitorWishlist(mut wishlist): VisitorWishlist,
    Form(form): Form<WishlistForm>,
) -> Result<Response> {
    let changed = form.product_id.is_some_and(|id| wishlist.remove(id));

    if let Some(id) = form.product_id.filter(|_| changed) {
        tracing::info!(product_id = %id, size = wishlist.len(), "Removed from wishlist");
        add_breadcrumb(
            "wishlist",
            "Removed from wishlist",
            Some(&[("product_id", &id.to_string())]),
        );
    }

    redirect_with_wishlist(&state, "/wishlist", &wishlist, changed)
}
