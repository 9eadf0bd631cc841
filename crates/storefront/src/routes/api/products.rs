//! Catalog JSON endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use stride_core::Product;
use stride_core::catalog::CatalogQuery;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::products::ListingQuery;
use crate::state::AppState;

/// A product with its rating summary and related products.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub average_rating: f64,
    pub review_count: usize,
    pub related: Vec<Product>,
}

/// `GET /api/products`: filtered and sorted catalog.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Json<Vec<Product>> {
    Json(state.catalog().query(&CatalogQuery::from(&query)))
}

/// `GET /api/products/{id}`: one product, 404 when unknown.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetail>> {
    let product = id
        .parse()
        .ok()
        .and_then(|id| state.catalog().get_by_id(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ProductDetail {
        average_rating: product.average_rating(),
        review_count: product.reviews.len(),
        related: state.catalog().related(product.id),
        product,
    }))
}

/// `GET /api/brands`: distinct brands, sorted.
#[instrument(skip(state))]
pub async fn brands(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog().all_brands())
}
