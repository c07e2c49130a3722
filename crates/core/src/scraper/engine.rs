//! Concurrency scheduler: fans eligible items out to workers under a fixed
//! cap and merges results back into the catalog in input order.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::browser::SessionPool;
use crate::catalog::{CatalogItem, TIMESTAMP_FORMAT};
use crate::config::Config;
use crate::progress::{ProgressTracker, DEFAULT_PROGRESS_FILE};
use crate::shutdown::ShutdownSignal;

use super::eligibility::is_due_at;
use super::{worker, EngineError};

/// Outcome counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Catalog size.
    pub total: usize,
    /// Items due for a refresh.
    pub eligible: usize,
    /// Items actually handed to a worker (less than `eligible` only when a
    /// shutdown truncates the dispatch loop).
    pub dispatched: usize,
    pub successful: usize,
    pub failed: usize,
}

pub struct ScrapeEngine {
    selector: String,
    retries: u32,
    max_threads: usize,
    interval_hours: u64,
    progress_path: PathBuf,
    pool: Arc<SessionPool>,
    shutdown: ShutdownSignal,
}

impl ScrapeEngine {
    pub fn new(config: &Config, pool: Arc<SessionPool>, shutdown: ShutdownSignal) -> Self {
        Self {
            selector: config.price_selector.clone(),
            retries: config.retries,
            max_threads: config.max_threads,
            interval_hours: config.scrape_interval_hours,
            progress_path: PathBuf::from(DEFAULT_PROGRESS_FILE),
            pool,
            shutdown,
        }
    }

    /// Override where the progress snapshot is published.
    pub fn with_progress_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.progress_path = path.into();
        self
    }

    /// Run one refresh pass over the catalog.
    ///
    /// Successful items get `current_price` and `last_scrape` rewritten in
    /// place; everything else is left untouched. The progress file exists
    /// exactly for the duration of a non-empty run.
    pub async fn run(&self, catalog: &mut [CatalogItem]) -> Result<RunSummary, EngineError> {
        let now = Local::now().naive_local();
        let eligible: Vec<usize> = catalog
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                !item.link.trim().is_empty() && is_due_at(item, self.interval_hours, now)
            })
            .map(|(idx, _)| idx)
            .collect();

        info!(
            "Scraping {} items (out of {})...",
            eligible.len(),
            catalog.len()
        );

        if eligible.is_empty() {
            return Ok(RunSummary {
                total: catalog.len(),
                ..RunSummary::default()
            });
        }

        // Setup-fatal on purpose: if the initial snapshot cannot be
        // published, fail before any worker starts so no partial progress
        // file is left behind.
        let tracker = Arc::new(ProgressTracker::create(
            &self.progress_path,
            catalog.len(),
            eligible.len(),
        )?);

        let semaphore = Arc::new(Semaphore::new(self.max_threads));
        let mut handles = Vec::with_capacity(eligible.len());

        for &idx in &eligible {
            // Cooperative cancellation point: a requested shutdown stops
            // new dispatches while in-flight workers drain.
            if self.shutdown.is_shutdown_requested() {
                warn!(
                    "Shutdown requested, leaving {} item(s) undispatched",
                    eligible.len() - handles.len()
                );
                break;
            }

            // Acquiring here (not inside the task) bounds in-flight work
            // and makes the loop pause at the cap between dispatches.
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break, // semaphore closed, cannot happen
            };

            // The wait at the cap can outlive a shutdown request; re-check
            // before committing this item.
            if self.shutdown.is_shutdown_requested() {
                warn!(
                    "Shutdown requested, leaving {} item(s) undispatched",
                    eligible.len() - handles.len()
                );
                drop(permit);
                break;
            }

            let pool = Arc::clone(&self.pool);
            let tracker = Arc::clone(&tracker);
            let item = catalog[idx].clone();
            let selector = self.selector.clone();
            let retries = self.retries;

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = worker::scrape_item(&pool, &item, &selector, retries).await;
                // Exactly one terminal outcome per dispatched item.
                if let Err(e) = tracker.update(result.is_some()) {
                    warn!("Failed to publish progress for {}: {}", item.name, e);
                }
                result
            });
            handles.push((idx, handle));
        }

        let dispatched = handles.len();

        // Join in input order; completion order is irrelevant because each
        // result is keyed by its catalog index.
        let mut results: Vec<(usize, Option<String>)> = Vec::with_capacity(dispatched);
        for (idx, handle) in handles {
            match handle.await {
                Ok(result) => results.push((idx, result)),
                Err(e) => {
                    // A panicked worker is isolated here: it still counts
                    // as one failed outcome and the batch continues.
                    warn!("Scrape task for {} aborted: {}", catalog[idx].name, e);
                    if let Err(e) = tracker.update(false) {
                        warn!("Failed to publish progress: {}", e);
                    }
                    results.push((idx, None));
                }
            }
        }

        // Merge after all workers completed; the catalog is never mutated
        // concurrently.
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let mut successful = 0;
        for (idx, result) in results {
            let item = &mut catalog[idx];
            match result {
                Some(price) => {
                    info!("Updated {} with price: {}", item.name, price);
                    item.current_price = Some(price);
                    item.last_scrape = Some(stamp.clone());
                    successful += 1;
                }
                None => warn!("No price scraped for {}", item.name),
            }
        }

        tracker.cleanup();

        Ok(RunSummary {
            total: catalog.len(),
            eligible: eligible.len(),
            dispatched,
            successful,
            failed: dispatched - successful,
        })
    }
}
