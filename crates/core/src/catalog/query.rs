//! Catalog listing filters and price sorting.
//!
//! Filters compose conjunctively and an absent or empty filter value matches
//! everything. Sorting is stable, so products with equal prices keep their
//! catalog order.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::types::Product;

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep catalog order.
    #[default]
    None,
    PriceAscending,
    PriceDescending,
}

impl SortOrder {
    /// Parse the `sortBy` query value. Unrecognized values keep catalog order.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "PriceLowToHigh" => Self::PriceAscending,
            "PriceHighToLow" => Self::PriceDescending,
            _ => Self::None,
        }
    }

    /// The `sortBy` query value for this order (empty for catalog order).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::PriceAscending => "PriceLowToHigh",
            Self::PriceDescending => "PriceHighToLow",
        }
    }
}

/// Filter and sort options for the product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Inclusive upper bound on price.
    pub max_price: Option<Decimal>,
    /// Case-insensitive exact brand match.
    pub brand: Option<String>,
    /// Case-insensitive exact gender match.
    pub gender: Option<String>,
    pub sort: SortOrder,
}

impl CatalogQuery {
    /// Whether `product` passes every active filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(max) = self.max_price
            && product.price.amount() > max
        {
            return false;
        }

        if let Some(brand) = non_empty(self.brand.as_deref())
            && !eq_ignore_case(&product.brand, brand)
        {
            return false;
        }

        if let Some(gender) = non_empty(self.gender.as_deref())
            && !eq_ignore_case(&product.gender, gender)
        {
            return false;
        }

        true
    }

    /// Filter and sort `products`, returning the full result without paging.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut result: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();

        match self.sort {
            SortOrder::None => {}
            SortOrder::PriceAscending => result.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDescending => result.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        result
    }
}

/// Distinct brand names in lexicographic order.
#[must_use]
pub fn distinct_brands(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.brand.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
