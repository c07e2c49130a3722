//! Session pool: a registry of every open browser session.
//!
//! The pool exists so a shutdown can release every live Chrome process in
//! one call, even while workers are mid-flight. It is owned by the run
//! context and passed by reference to workers; there is no process-global
//! state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use super::error::BrowserError;
use super::traits::{BrowserEngine, BrowserSession, SessionOptions};

pub struct SessionPool {
    engine: Arc<dyn BrowserEngine>,
    options: SessionOptions,
    sessions: Mutex<HashMap<u64, Arc<dyn BrowserSession>>>,
    next_id: AtomicU64,
}

/// A pooled session checked out by one worker. Returned to the pool via
/// [`SessionPool::close`].
pub struct SessionHandle {
    id: u64,
    session: Arc<dyn BrowserSession>,
}

impl SessionHandle {
    pub async fn fetch_text(&self, url: &str, selector: &str) -> Result<String, BrowserError> {
        self.session.fetch_text(url, selector).await
    }
}

impl SessionPool {
    pub fn new(engine: Arc<dyn BrowserEngine>, options: SessionOptions) -> Self {
        Self {
            engine,
            options,
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Launch a fresh session and register it.
    pub async fn open(&self) -> Result<SessionHandle, BrowserError> {
        let session: Arc<dyn BrowserSession> =
            Arc::from(self.engine.launch(&self.options).await?);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        self.sessions
            .lock()
            .expect("session registry poisoned")
            .insert(id, Arc::clone(&session));

        debug!("Opened browser session {} ({})", id, self.engine.name());
        Ok(SessionHandle { id, session })
    }

    /// Close a session and drop it from the registry.
    ///
    /// If `close_all` already claimed the session, this is a no-op; that
    /// race is expected during shutdown.
    pub async fn close(&self, handle: SessionHandle) {
        let claimed = self
            .sessions
            .lock()
            .expect("session registry poisoned")
            .remove(&handle.id);

        match claimed {
            Some(session) => {
                if let Err(e) = session.close().await {
                    warn!("Failed to close browser session {}: {}", handle.id, e);
                }
                debug!("Closed browser session {}", handle.id);
            }
            None => debug!("Browser session {} already closed", handle.id),
        }
    }

    /// Close every registered session. Idempotent and safe to call while
    /// workers are mid-flight; their next page operation fails and is
    /// handled like any other attempt failure.
    pub async fn close_all(&self) {
        let drained: Vec<(u64, Arc<dyn BrowserSession>)> = {
            let mut sessions = self.sessions.lock().expect("session registry poisoned");
            sessions.drain().collect()
        };

        if drained.is_empty() {
            return;
        }

        debug!("Force-closing {} browser session(s)", drained.len());
        for (id, session) in drained {
            if let Err(e) = session.close().await {
                warn!("Failed to close browser session {}: {}", id, e);
            }
        }
    }

    /// Number of currently registered sessions.
    pub fn open_sessions(&self) -> usize {
        self.sessions.lock().expect("session registry poisoned").len()
    }
}
