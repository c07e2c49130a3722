mod cdp;
mod error;
mod pool;
mod traits;

pub use cdp::CdpEngine;
pub use error::BrowserError;
pub use pool::{SessionHandle, SessionPool};
pub use traits::{BrowserEngine, BrowserSession, SessionOptions};
