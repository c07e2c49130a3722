//! Decides per item whether a price refresh is due.

use chrono::{Duration, Local, NaiveDateTime};
use tracing::warn;

use crate::catalog::{CatalogItem, TIMESTAMP_FORMAT};

/// Whether `item` is due for a refresh, evaluated against `now`.
///
/// A corrupt `Last Scrape` value counts as due: re-scraping is preferred
/// over silently skipping an item on bad data.
pub fn is_due_at(item: &CatalogItem, interval_hours: u64, now: NaiveDateTime) -> bool {
    if interval_hours == 0 {
        return true;
    }

    let last_scrape = match item.last_scrape.as_deref() {
        Some(value) if !value.trim().is_empty() => value,
        _ => return true,
    };

    match NaiveDateTime::parse_from_str(last_scrape, TIMESTAMP_FORMAT) {
        Ok(last) => now - last >= Duration::hours(interval_hours as i64),
        Err(_) => {
            warn!(
                "Invalid 'Last Scrape' format for item {}: scraping anyway",
                item.name
            );
            true
        }
    }
}

/// [`is_due_at`] against the local clock.
pub fn is_due(item: &CatalogItem, interval_hours: u64) -> bool {
    is_due_at(item, interval_hours, Local::now().naive_local())
}
