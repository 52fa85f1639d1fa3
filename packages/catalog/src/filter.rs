//! Search and category filtering over product collections.
//!
//! Both functions are pure and make a full pass every time; nothing is cached
//! between calls.

use store::Product;

/// Products from `source` that match `term` and `category`.
///
/// A non-empty `term` keeps products whose name or category contains it,
/// ignoring case. A `category` keeps products whose category equals it
/// exactly. An empty term and no category return `source` unchanged.
pub fn filter_products(source: &[Product], term: &str, category: Option<&str>) -> Vec<Product> {
    let term = term.to_lowercase();
    source
        .iter()
        .filter(|product| {
            term.is_empty()
                || product.name.to_lowercase().contains(&term)
                || product.data_category.to_lowercase().contains(&term)
        })
        .filter(|product| category.map_or(true, |c| product.data_category == c))
        .cloned()
        .collect()
}

/// Distinct categories in first-seen order.
pub fn categories(all_products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in all_products {
        if !seen.iter().any(|c| *c == product.data_category) {
            seen.push(product.data_category.clone());
        }
    }
    seen
}
