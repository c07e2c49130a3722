use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from a JSON file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Json::file(path))
        .merge(Env::prefixed("PRICEWATCH_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from a JSON string (useful for testing)
pub fn load_config_from_str(json_str: &str) -> Result<Config, ConfigError> {
    serde_json::from_str(json_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
