mod tracker;
mod types;

pub use tracker::ProgressTracker;
pub use types::ProgressState;

use thiserror::Error;

/// Default path of the published progress snapshot. External pollers (the
/// GUI) treat the file's existence as "a run is active".
pub const DEFAULT_PROGRESS_FILE: &str = "scrape_progress.json";

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Failed to serialize progress state: {0}")]
    Serialize(String),

    #[error("Failed to publish progress state: {0}")]
    Io(#[from] std::io::Error),
}
