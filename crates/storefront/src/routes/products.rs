//! Product route handlers.

use std::collections::BTreeSet;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use stride_core::catalog::{CatalogQuery, SortOrder};
use stride_core::{Product, ProductId, Review};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::VisitorWishlist;
use crate::services::recently_viewed;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub brand: String,
    pub gender: String,
    pub category: String,
    /// Mean rating to one decimal place, `None` when unreviewed.
    pub rating: Option<String>,
    pub review_count: usize,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.formatted_price(),
            image_url: product.image_url.clone(),
            brand: product.brand.clone(),
            gender: product.gender.clone(),
            category: product.category.clone(),
            rating: product.rating_summary().map(|r| format!("{r:.1}")),
            review_count: product.reviews.len(),
        }
    }
}

/// Convert products to template views.
pub fn views<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<ProductView> {
    products.into_iter().map(ProductView::from).collect()
}

/// Review display data for templates.
#[derive(Clone)]
pub struct ReviewView {
    pub rating: i32,
    pub comment: String,
    pub reviewer_name: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            rating: review.rating,
            comment: review.comment.clone(),
            reviewer_name: review.reviewer_name.clone(),
        }
    }
}

/// A `<select>` option with its selection state resolved.
#[derive(Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionView {
    fn new(value: &str, label: &str, current: Option<&str>) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: current.is_some_and(|c| c.eq_ignore_ascii_case(value)),
        }
    }
}

/// Sort choices for the listing form, marking the order actually applied.
fn sort_options(current: SortOrder) -> Vec<OptionView> {
    [
        (SortOrder::PriceAscending, "Price: low to high"),
        (SortOrder::PriceDescending, "Price: high to low"),
    ]
    .into_iter()
    .map(|(order, label)| OptionView {
        value: order.as_str().to_string(),
        label: label.to_string(),
        selected: order == current,
    })
    .collect()
}

/// Listing query parameters.
///
/// Binding is lenient: an empty or non-numeric `maxPrice` is treated as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub max_price: Option<Decimal>,
    pub brand: Option<String>,
    pub gender: Option<String>,
}

impl From<&ListingQuery> for CatalogQuery {
    fn from(query: &ListingQuery) -> Self {
        Self {
            max_price: query.max_price,
            brand: query.brand.clone(),
            gender: query.gender.clone(),
            sort: query
                .sort_by
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
        }
    }
}

fn lenient_decimal<'de, D>(deserializer: D) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<Decimal>().ok()))
}

fn lenient_i32<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()).unwrap_or_default())
}

/// Review submission form.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default, deserialize_with = "lenient_i32")]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub reviewer_name: String,
}

impl From<ReviewForm> for Review {
    fn from(form: ReviewForm) -> Self {
        Self::new(form.rating, form.comment.trim(), form.reviewer_name.trim())
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub brands: Vec<OptionView>,
    pub genders: Vec<OptionView>,
    pub sort_options: Vec<OptionView>,
    pub max_price: String,
    pub recently_viewed: Vec<ProductView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub reviews: Vec<ReviewView>,
    pub average_rating: String,
    pub related_products: Vec<ProductView>,
    pub recently_viewed: Vec<ProductView>,
    pub in_wishlist: bool,
}

/// Parse a path segment as a product id; anything else is not a product.
fn parse_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("product {raw}")))
}

/// Display product listing page.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog();
    let catalog_query = CatalogQuery::from(&query);
    let products = catalog.query(&catalog_query);
    let recent = recently_viewed::load(&session).await;

    let brands = catalog
        .all_brands()
        .iter()
        .map(|b| OptionView::new(b, b, query.brand.as_deref()))
        .collect();

    let genders = catalog
        .all()
        .iter()
        .map(|p| p.gender.as_str())
        .filter(|g| !g.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|g| OptionView::new(g, g, query.gender.as_deref()))
        .collect();

    tracing::debug!(results = products.len(), "Catalog listing");

    ProductsIndexTemplate {
        products: views(&products),
        brands,
        genders,
        sort_options: sort_options(catalog_query.sort),
        max_price: query.max_price.map(|p| p.to_string()).unwrap_or_default(),
        recently_viewed: views(&catalog.resolve(recent.ids())),
    }
}

/// Display product detail page.
///
/// The view is tracked before the lookup, so unknown ids are recorded too and
/// dropped again when the list is resolved.
#[instrument(skip(state, session, wishlist))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    VisitorWishlist(wishlist): VisitorWishlist,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let recent = recently_viewed::track(&session, id).await?;

    let catalog = state.catalog();
    let product = catalog
        .get_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    add_breadcrumb(
        "navigation",
        "Viewed product",
        Some(&[("product_id", &id.to_string())]),
    );

    Ok(ProductShowTemplate {
        reviews: product.reviews.iter().map(ReviewView::from).collect(),
        average_rating: format!("{:.1}", catalog.average_rating(id)),
        related_products: views(&catalog.related(id)),
        recently_viewed: views(&catalog.resolve(recent.ids())),
        in_wishlist: wishlist.contains(id),
        product: ProductView::from(&product),
    })
}

/// Append a review and return to the product page.
///
/// Reviews for unknown products are dropped. A failed catalog write is
/// reported but the visitor is still redirected.
#[instrument(skip(state, form))]
pub async fn add_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let review = Review::from(form);

    let store = state.clone();
    let outcome = tokio::task::spawn_blocking(move || store.catalog().add_review(id, review))
        .await
        .map_err(|e| AppError::Internal(format!("review task failed: {e}")))?;

    match outcome {
        Ok(true) => {
            tracing::info!(product_id = %id, "Review added");
            add_breadcrumb(
                "catalog",
                "Added review",
                Some(&[("product_id", &id.to_string())]),
            );
        }
        Ok(false) => tracing::debug!(product_id = %id, "Review for unknown product ignored"),
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(
                error = %e,
                sentry_event_id = %event_id,
                product_id = %id,
                "Failed to persist review"
            );
        }
    }

    Ok(Redirect::to(&format!("/products/{id}")))
}
