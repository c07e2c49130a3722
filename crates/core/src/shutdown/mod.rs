//! Run lifecycle state machine.
//!
//! `Running -> ShutdownRequested -> Draining -> Terminated`, forward-only.
//! The binary owns the [`ShutdownCoordinator`] and drives the transitions
//! when a termination signal arrives; the scheduler holds a cheap
//! [`ShutdownSignal`] and checks it between dispatches. Resource release
//! (closing browser sessions) happens on the context that decides to exit,
//! never inside a signal handler, so cleanup always runs to completion.

use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    Running,
    ShutdownRequested,
    Draining,
    Terminated,
}

pub struct ShutdownCoordinator {
    tx: watch::Sender<LifecycleState>,
}

/// Read side of the lifecycle. Cheap to clone; held by the scheduler.
#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<LifecycleState>,
}

impl ShutdownCoordinator {
    pub fn new() -> (Self, ShutdownSignal) {
        let (tx, rx) = watch::channel(LifecycleState::Running);
        (Self { tx }, ShutdownSignal { rx })
    }

    /// Move to `ShutdownRequested`. Returns false if shutdown was already
    /// underway (e.g. a second signal).
    pub fn request_shutdown(&self) -> bool {
        let transitioned = self.advance(LifecycleState::ShutdownRequested);
        if transitioned {
            info!("Shutdown requested");
        }
        transitioned
    }

    /// Mark that resources are released and in-flight work is draining.
    pub fn begin_drain(&self) {
        self.advance(LifecycleState::Draining);
    }

    /// Final state, set right before the process exits.
    pub fn terminate(&self) {
        self.advance(LifecycleState::Terminated);
    }

    pub fn state(&self) -> LifecycleState {
        *self.tx.borrow()
    }

    // Transitions only move forward; stale or duplicate requests are
    // ignored.
    fn advance(&self, to: LifecycleState) -> bool {
        self.tx.send_if_modified(|state| {
            if to > *state {
                *state = to;
                true
            } else {
                false
            }
        })
    }
}

impl ShutdownSignal {
    pub fn is_shutdown_requested(&self) -> bool {
        *self.rx.borrow() >= LifecycleState::ShutdownRequested
    }

    pub fn state(&self) -> LifecycleState {
        *self.rx.borrow()
    }
}
