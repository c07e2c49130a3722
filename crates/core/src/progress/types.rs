//! Published run-progress snapshot.

use serde::{Deserialize, Serialize};

/// Counters for one scrape run. The JSON field names are the contract with
/// external pollers and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Catalog size.
    pub total_items: usize,
    /// Size of the eligible subset for this run.
    pub items_to_scrape: usize,
    /// Items with a terminal outcome so far. Always equals
    /// `failed + successful`.
    pub processed: usize,
    pub failed: usize,
    pub successful: usize,
    /// Seconds, extrapolated from the per-item average so far. 0 until the
    /// first item completes.
    pub estimated_remaining_time: f64,
}

impl ProgressState {
    pub fn new(total_items: usize, items_to_scrape: usize) -> Self {
        Self {
            total_items,
            items_to_scrape,
            processed: 0,
            failed: 0,
            successful: 0,
            estimated_remaining_time: 0.0,
        }
    }
}
