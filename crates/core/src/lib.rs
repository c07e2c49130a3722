pub mod browser;
pub mod catalog;
pub mod config;
pub mod progress;
pub mod scraper;
pub mod shutdown;

pub use browser::{
    BrowserEngine, BrowserError, BrowserSession, CdpEngine, SessionHandle, SessionOptions,
    SessionPool,
};
pub use catalog::{
    load_catalog, parse_price, save_catalog, total_value, CatalogError, CatalogItem,
    TIMESTAMP_FORMAT,
};
pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use progress::{ProgressError, ProgressState, ProgressTracker, DEFAULT_PROGRESS_FILE};
pub use scraper::{is_due, is_due_at, EngineError, RunSummary, ScrapeEngine};
pub use shutdown::{LifecycleState, ShutdownCoordinator, ShutdownSignal};
