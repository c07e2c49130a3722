use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - price_selector is not empty
/// - retries, MAX_THREADS and timeout are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.price_selector.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "price_selector cannot be empty".to_string(),
        ));
    }

    if config.retries == 0 {
        return Err(ConfigError::ValidationError(
            "retries cannot be 0".to_string(),
        ));
    }

    if config.max_threads == 0 {
        return Err(ConfigError::ValidationError(
            "MAX_THREADS cannot be 0".to_string(),
        ));
    }

    if config.timeout == 0 {
        return Err(ConfigError::ValidationError(
            "timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}
