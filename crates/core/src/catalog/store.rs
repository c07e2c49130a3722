//! Whole-file catalog persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use super::{types::CatalogItem, CatalogError};

/// Load the full catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogItem>, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            CatalogError::NotFound(path.display().to_string())
        } else {
            CatalogError::Io(e)
        }
    })?;

    let items: Vec<CatalogItem> =
        serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(e.to_string()))?;

    info!("Loaded {} entries from {:?}", items.len(), path);
    Ok(items)
}

/// Save the full catalog back to disk, replacing the previous contents.
pub fn save_catalog(path: &Path, items: &[CatalogItem]) -> Result<(), CatalogError> {
    let raw =
        serde_json::to_string_pretty(items).map_err(|e| CatalogError::Parse(e.to_string()))?;
    fs::write(path, raw)?;
    info!("Saved {} entries to {:?}", items.len(), path);
    Ok(())
}
