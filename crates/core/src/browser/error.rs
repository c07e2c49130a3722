//! Error types for the browser module.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while driving a browser session.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The browser process could not be launched.
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    /// Navigation to the target URL failed or timed out.
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// The target selector never appeared within the deadline.
    #[error("Selector {selector:?} not found within {timeout:?}")]
    SelectorTimeout { selector: String, timeout: Duration },

    /// The selector matched an element with no extractable text.
    #[error("Selector {0:?} matched an element with no text")]
    MissingText(String),

    /// The session was closed, typically by a shutdown-driven close_all.
    #[error("Browser session is closed")]
    Closed,

    /// Any other DevTools protocol failure.
    #[error("Browser protocol error: {0}")]
    Cdp(String),
}
