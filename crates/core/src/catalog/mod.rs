mod store;
mod types;
mod value;

pub use store::{load_catalog, save_catalog};
pub use types::{CatalogItem, TIMESTAMP_FORMAT};
pub use value::{parse_price, total_value};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
