mod eligibility;
mod engine;
mod worker;

pub use eligibility::{is_due, is_due_at};
pub use engine::{RunSummary, ScrapeEngine};

use thiserror::Error;

/// Errors that abort a run before any worker starts. Per-item failures are
/// never surfaced here; they are isolated inside the run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to initialize progress reporting: {0}")]
    Progress(#[from] crate::progress::ProgressError),
}
