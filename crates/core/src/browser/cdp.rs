//! Chrome DevTools Protocol engine backed by chromiumoxide.
//!
//! Each session is its own headless Chrome process so retries never share
//! cookie or cache state.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, SetBlockedUrLsParams, SetUserAgentOverrideParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, warn};

use super::error::BrowserError;
use super::traits::{BrowserEngine, BrowserSession, SessionOptions};

/// How often the selector wait re-polls the page.
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launches one headless Chrome process per session.
pub struct CdpEngine;

impl CdpEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CdpEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowserEngine for CdpEngine {
    fn name(&self) -> &str {
        "chromium-cdp"
    }

    async fn launch(
        &self,
        options: &SessionOptions,
    ) -> Result<Box<dyn BrowserSession>, BrowserError> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // The handler stream must be driven for the CDP connection to make
        // progress; it ends when the browser process goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Box::new(CdpSession {
            browser: Mutex::new(Some(browser)),
            handler_task,
            options: options.clone(),
        }))
    }
}

/// One live Chrome process plus the task driving its event stream.
pub struct CdpSession {
    // Taken on close so a racing close_all and owner close cannot both
    // tear the process down.
    browser: Mutex<Option<Browser>>,
    handler_task: JoinHandle<()>,
    options: SessionOptions,
}

impl CdpSession {
    async fn new_page(&self) -> Result<Page, BrowserError> {
        let guard = self.browser.lock().await;
        let browser = guard.as_ref().ok_or(BrowserError::Closed)?;
        browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Cdp(e.to_string()))
    }

    async fn configure_page(&self, page: &Page) -> Result<(), BrowserError> {
        if let Some(ref user_agent) = self.options.user_agent {
            let params = SetUserAgentOverrideParams::builder()
                .user_agent(user_agent.clone())
                .build()
                .map_err(BrowserError::Cdp)?;
            page.set_user_agent(params)
                .await
                .map_err(|e| BrowserError::Cdp(e.to_string()))?;
        }

        if !self.options.blocked_resources.is_empty() {
            page.execute(EnableParams::default())
                .await
                .map_err(|e| BrowserError::Cdp(e.to_string()))?;

            let patterns: Vec<String> = self
                .options
                .blocked_resources
                .iter()
                .map(|ext| format!("*.{ext}"))
                .collect();
            let params = SetBlockedUrLsParams::builder()
                .urls(patterns)
                .build()
                .map_err(BrowserError::Cdp)?;
            page.execute(params)
                .await
                .map_err(|e| BrowserError::Cdp(e.to_string()))?;
        }

        Ok(())
    }

    async fn wait_for_selector(
        &self,
        page: &Page,
        selector: &str,
    ) -> Result<String, BrowserError> {
        let deadline = self.options.navigation_timeout;

        let element = timeout(deadline, async {
            loop {
                if let Ok(element) = page.find_element(selector).await {
                    return element;
                }
                sleep(SELECTOR_POLL_INTERVAL).await;
            }
        })
        .await
        .map_err(|_| BrowserError::SelectorTimeout {
            selector: selector.to_string(),
            timeout: deadline,
        })?;

        let text = element
            .inner_text()
            .await
            .map_err(|e| BrowserError::Cdp(e.to_string()))?
            .ok_or_else(|| BrowserError::MissingText(selector.to_string()))?;

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl BrowserSession for CdpSession {
    async fn fetch_text(&self, url: &str, selector: &str) -> Result<String, BrowserError> {
        let page = self.new_page().await?;
        self.configure_page(&page).await?;

        let deadline = self.options.navigation_timeout;
        timeout(deadline, page.goto(url))
            .await
            .map_err(|_| BrowserError::Navigation {
                url: url.to_string(),
                reason: format!("timed out after {deadline:?}"),
            })?
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let text = self.wait_for_selector(&page, selector).await?;

        if let Err(e) = page.close().await {
            debug!("Failed to close page for {}: {}", url, e);
        }

        Ok(text)
    }

    async fn close(&self) -> Result<(), BrowserError> {
        let taken = self.browser.lock().await.take();

        if let Some(mut browser) = taken {
            if let Err(e) = browser.close().await {
                warn!("Failed to close browser: {}", e);
            }
            if let Err(e) = browser.wait().await {
                debug!("Browser process did not exit cleanly: {}", e);
            }
            self.handler_task.abort();
        }

        Ok(())
    }
}
