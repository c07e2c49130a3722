//! Configuration record for a scrape run.
//!
//! Deserialized once at startup and passed to each component's constructor.
//! The JSON keys are the ones the external tooling (spreadsheet sync, GUI)
//! already writes into `config.json`, including the legacy `MAX_THREADS`
//! spelling.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::browser::SessionOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// CSS selector of the page element holding the price.
    pub price_selector: String,

    /// Maximum scrape attempts per catalog item.
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Concurrency cap: maximum number of in-flight scrapes.
    #[serde(rename = "MAX_THREADS", default = "default_max_threads")]
    pub max_threads: usize,

    /// Items refreshed within this many hours are skipped. 0 forces a
    /// refresh of everything.
    #[serde(default)]
    pub scrape_interval_hours: u64,

    /// Per-navigation and selector-wait deadline, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout: u64,

    /// User agent applied to every browser session.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// File extensions whose fetches are blocked in the browser
    /// (e.g. "png", "woff2", "mp4") to cut page load time.
    #[serde(default)]
    pub block_resources: Vec<String>,

    /// Catalog file, loaded and saved whole.
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Log level used when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_retries() -> u32 {
    3
}

fn default_max_threads() -> usize {
    4
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_output_file() -> PathBuf {
    PathBuf::from("sheet_data.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Browser session options derived from this config.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            user_agent: self.user_agent.clone(),
            navigation_timeout: self.timeout(),
            blocked_resources: self.block_resources.clone(),
        }
    }
}
