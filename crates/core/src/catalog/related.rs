//! Related product selection.

use crate::types::Product;

/// Maximum number of related products returned.
pub const RELATED_LIMIT: usize = 5;

/// Products other than `source` sharing its category or brand.
///
/// Results keep catalog order and are cut at [`RELATED_LIMIT`]; there is no
/// ranking beyond that.
#[must_use]
pub fn related_products<'a>(source: &Product, catalog: &'a [Product]) -> Vec<&'a Product> {
    catalog
        .iter()
        .filter(|p| p.id != source.id)
        .filter(|p| p.category == source.category || p.brand == source.brand)
        .take(RELATED_LIMIT)
        .collect()
}
