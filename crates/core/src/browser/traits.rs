//! Trait definitions for the browser module.

use std::time::Duration;

use async_trait::async_trait;

use super::error::BrowserError;

/// Options applied to every session a pool opens.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    /// User agent override, when configured.
    pub user_agent: Option<String>,
    /// Deadline for page navigation and for the selector to appear.
    pub navigation_timeout: Duration,
    /// File extensions whose requests are blocked (e.g. "png", "woff2").
    pub blocked_resources: Vec<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            navigation_timeout: Duration::from_secs(30),
            blocked_resources: Vec::new(),
        }
    }
}

/// One live browser automation session.
///
/// Opaque to callers: it is opened, used for a single fetch, and closed.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate to `url`, wait for `selector` to appear and return its
    /// text content.
    async fn fetch_text(&self, url: &str, selector: &str) -> Result<String, BrowserError>;

    /// Close the session. Must be idempotent: closing an already-closed
    /// session is a no-op, because an owner close can race a pool-wide
    /// close_all.
    async fn close(&self) -> Result<(), BrowserError>;
}

/// Factory for browser sessions.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// Returns the name of this engine implementation.
    fn name(&self) -> &str;

    /// Launch a fresh session configured with `options`.
    async fn launch(
        &self,
        options: &SessionOptions,
    ) -> Result<Box<dyn BrowserSession>, BrowserError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct MockSession {
        closed: AtomicBool,
    }

    #[async_trait]
    impl BrowserSession for MockSession {
        async fn fetch_text(&self, _url: &str, selector: &str) -> Result<String, BrowserError> {
            if self.closed.load(Ordering::SeqCst) {
                return Err(BrowserError::Closed);
            }
            if selector == ".missing" {
                return Err(BrowserError::SelectorTimeout {
                    selector: selector.to_string(),
                    timeout: Duration::from_secs(1),
                });
            }
            Ok("$9.99".to_string())
        }

        async fn close(&self) -> Result<(), BrowserError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct MockEngine;

    #[async_trait]
    impl BrowserEngine for MockEngine {
        fn name(&self) -> &str {
            "mock"
        }

        async fn launch(
            &self,
            _options: &SessionOptions,
        ) -> Result<Box<dyn BrowserSession>, BrowserError> {
            Ok(Box::new(MockSession {
                closed: AtomicBool::new(false),
            }))
        }
    }

    #[tokio::test]
    async fn test_mock_session_fetch() {
        let engine = MockEngine;
        let session = engine.launch(&SessionOptions::default()).await.unwrap();
        let text = session.fetch_text("https://example.com", ".price").await.unwrap();
        assert_eq!(text, "$9.99");
    }

    #[tokio::test]
    async fn test_mock_session_closed_fetch_fails() {
        let engine = MockEngine;
        let session = engine.launch(&SessionOptions::default()).await.unwrap();
        session.close().await.unwrap();
        let result = session.fetch_text("https://example.com", ".price").await;
        assert!(matches!(result, Err(BrowserError::Closed)));
    }

    #[tokio::test]
    async fn test_double_close_is_noop() {
        let engine = MockEngine;
        let session = engine.launch(&SessionOptions::default()).await.unwrap();
        session.close().await.unwrap();
        assert!(session.close().await.is_ok());
    }
}
