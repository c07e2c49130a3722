//! Aggregate valuation over scraped prices.

use tracing::warn;

use super::types::CatalogItem;

/// Parse a currency-formatted price string like "$1,234.56".
///
/// Only dollar-prefixed values are considered priced; anything else is
/// treated as "no price yet".
pub fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('$') {
        return None;
    }
    match trimmed.replace(['$', ','], "").parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Invalid price format: {}", trimmed);
            None
        }
    }
}

/// Total value of all priced items, ignoring the `ignore_highest` most
/// expensive ones.
pub fn total_value(items: &[CatalogItem], ignore_highest: usize) -> f64 {
    let mut prices: Vec<f64> = items
        .iter()
        .filter_map(|item| item.current_price.as_deref())
        .filter_map(parse_price)
        .collect();

    prices.sort_by(|a, b| a.total_cmp(b));

    if ignore_highest > 0 && ignore_highest < prices.len() {
        prices.truncate(prices.len() - ignore_highest);
    } else if ignore_highest >= prices.len() {
        return 0.0;
    }

    prices.iter().sum()
}
