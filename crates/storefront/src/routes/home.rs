//! Home and privacy page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use stride_core::Product;
use tracing::instrument;

use super::products::{ProductView, views};
use crate::filters;
use crate::state::AppState;

/// Number of catalog products shown on the home page.
const FEATURED_PRODUCTS: usize = 4;

/// Number of customer reviews quoted on the home page.
const FEATURED_REVIEWS: usize = 3;

/// A customer review quoted on the home page with its product.
#[derive(Clone)]
pub struct FeaturedReviewView {
    pub reviewer_name: String,
    pub rating: i32,
    pub comment: String,
    pub product_id: i32,
    pub product_name: String,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured_products: Vec<ProductView>,
    pub featured_reviews: Vec<FeaturedReviewView>,
    pub brand_count: usize,
}

/// Privacy page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/privacy.html")]
pub struct PrivacyTemplate;

/// Five-star reviews with a comment, in catalog order.
fn featured_reviews(products: &[Product]) -> Vec<FeaturedReviewView> {
    products
        .iter()
        .flat_map(|product| {
            product
                .reviews
                .iter()
                .filter(|r| r.rating >= 5 && !r.comment.is_empty())
                .map(move |r| FeaturedReviewView {
                    reviewer_name: r.reviewer_name.clone(),
                    rating: r.rating,
                    comment: r.comment.clone(),
                    product_id: product.id.as_i32(),
                    product_name: product.name.clone(),
                })
        })
        .take(FEATURED_REVIEWS)
        .collect()
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let products = state.catalog().all();

    HomeTemplate {
        featured_products: views(products.iter().take(FEATURED_PRODUCTS)),
        featured_reviews: featured_reviews(&products),
        brand_count: state.catalog().all_brands().len(),
    }
}

/// Display the privacy page.
pub async fn privacy() -> impl IntoResponse {
    PrivacyTemplate
}
