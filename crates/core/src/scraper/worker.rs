//! Per-item fetch-with-retry sequence.

use std::time::Instant;

use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

use crate::browser::SessionPool;
use crate::catalog::CatalogItem;

/// Scrape one item's price. Runs while its caller holds a concurrency
/// permit.
///
/// Every attempt gets a fresh session from the pool so retries never share
/// cookie or cache state, and the session is returned to the pool on both
/// outcomes. Failed attempts back off `2^attempt` seconds (1, 2, 4, ...,
/// no jitter, no cap) with no delay after the final attempt. Returns None
/// once all attempts are exhausted; never propagates an error.
pub(crate) async fn scrape_item(
    pool: &SessionPool,
    item: &CatalogItem,
    selector: &str,
    retries: u32,
) -> Option<String> {
    info!("Scraping {}...", item.name);
    let started = Instant::now();

    for attempt in 0..retries {
        let outcome = match pool.open().await {
            Ok(session) => {
                let outcome = session.fetch_text(&item.link, selector).await;
                pool.close(session).await;
                outcome
            }
            Err(e) => Err(e),
        };

        let elapsed_ms = started.elapsed().as_millis();
        match outcome {
            Ok(price) => {
                info!("Price for {}: {} ({} ms)", item.name, price, elapsed_ms);
                return Some(price);
            }
            Err(e) => {
                warn!(
                    "Attempt {} failed for {} ({} ms): {}",
                    attempt + 1,
                    item.name,
                    elapsed_ms,
                    e
                );
                if attempt + 1 < retries {
                    let wait_secs = 1u64 << attempt.min(62);
                    info!("Retrying {} in {} seconds...", item.name, wait_secs);
                    sleep(Duration::from_secs(wait_secs)).await;
                }
            }
        }
    }

    error!("Failed to scrape {} after {} attempts", item.name, retries);
    None
}
