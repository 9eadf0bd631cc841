//! Catalog products and their reviews.
//!
//! Field names follow the catalog file's camelCase layout. Every field except
//! `id` tolerates being missing or `null`: strings and review lists coalesce to
//! empty, the price to zero.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Price, ProductId};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    #[serde(default)]
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Price,
    /// URL or static path of the product image.
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,
    /// Target gender (e.g. "Male", "Female", "Unisex").
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    /// Kind of shoe, e.g. running, walking, hiking.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// Reviews in submission order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
}

/// A customer review attached to one product.
///
/// The rating is expected to be 1-5 but is stored unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub rating: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviewer_name: String,
}

impl Product {
    /// Create a product with the given identity and price and every other
    /// field empty.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            image_url: String::new(),
            brand: String::new(),
            gender: String::new(),
            category: String::new(),
            reviews: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    #[must_use]
    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }

    /// Mean rating across all reviews, or `None` when there are no reviews.
    ///
    /// Use this when "not rated yet" must be told apart from a genuine zero.
    #[must_use]
    pub fn rating_summary(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }

        let total: i64 = self.reviews.iter().map(|r| i64::from(r.rating)).sum();
        #[allow(clippy::cast_precision_loss)] // Review counts and rating sums stay far below 2^52
        let mean = total as f64 / self.reviews.len() as f64;
        Some(mean)
    }

    /// Mean rating across all reviews, `0.0` when there are none.
    #[must_use]
    pub fn average_rating(&self) -> f64 {
        self.rating_summary().unwrap_or(0.0)
    }

    /// Price rendered for display (e.g. "£89.99").
    #[must_use]
    pub fn formatted_price(&self) -> String {
        self.price.formatted()
    }
}

impl Review {
    #[must_use]
    pub fn new(rating: i32, comment: impl Into<String>, reviewer_name: impl Into<String>) -> Self {
        Self {
            rating,
            comment: comment.into(),
            reviewer_name: reviewer_name.into(),
        }
    }
}

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
