//! Lock-guarded progress counters published to a durable side channel.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use tracing::warn;

use super::{types::ProgressState, ProgressError};

struct Inner {
    state: ProgressState,
    started_at: Instant,
}

/// Shared counter object for one run.
///
/// One mutex guards the whole read-modify-write-and-publish sequence, so
/// concurrent workers never interleave partial updates. The snapshot is
/// written to a temporary file and renamed over the published path, so a
/// poller reading mid-write never sees a torn file.
pub struct ProgressTracker {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl ProgressTracker {
    /// Start tracking a run and publish the initial snapshot immediately,
    /// before any item completes, so pollers see the run as active.
    pub fn create(
        path: impl Into<PathBuf>,
        total_items: usize,
        items_to_scrape: usize,
    ) -> Result<Self, ProgressError> {
        let path = path.into();
        let state = ProgressState::new(total_items, items_to_scrape);
        publish(&path, &state)?;

        Ok(Self {
            path,
            inner: Mutex::new(Inner {
                state,
                started_at: Instant::now(),
            }),
        })
    }

    /// Record one terminal item outcome and republish the snapshot.
    pub fn update(&self, success: bool) -> Result<ProgressState, ProgressError> {
        let mut inner = self.inner.lock().expect("progress lock poisoned");

        inner.state.processed += 1;
        if success {
            inner.state.successful += 1;
        } else {
            inner.state.failed += 1;
        }

        let remaining = inner.state.items_to_scrape.saturating_sub(inner.state.processed);
        let elapsed = inner.started_at.elapsed().as_secs_f64();
        inner.state.estimated_remaining_time =
            remaining as f64 * (elapsed / inner.state.processed as f64);

        publish(&self.path, &inner.state)?;
        Ok(inner.state.clone())
    }

    /// Current counters without touching the published file.
    pub fn snapshot(&self) -> ProgressState {
        self.inner
            .lock()
            .expect("progress lock poisoned")
            .state
            .clone()
    }

    /// Remove the published snapshot. Idempotent; a delete failure must
    /// never mask the outcome of the run, so it only warns.
    pub fn cleanup(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove progress file {:?}: {}", self.path, e),
        }
    }
}

/// Write-to-temporary-then-rename so the published file is replaced
/// atomically.
fn publish(path: &Path, state: &ProgressState) -> Result<(), ProgressError> {
    let raw = serde_json::to_string_pretty(state)
        .map_err(|e| ProgressError::Serialize(e.to_string()))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, raw)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
