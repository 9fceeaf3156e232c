//! Configuration validation
//!
//! Checks value ranges before a configuration is accepted, so that an
//! invalid file fails at startup rather than mid-crawl.

use crate::config::types::Config;
use crate::ConfigError;

/// Validates a loaded configuration
///
/// # Arguments
///
/// * `config` - The configuration to validate
///
/// # Returns
///
/// * `Ok(())` - Configuration is valid
/// * `Err(ConfigError::Validation)` - A value is out of range
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.crawler.default_max_pages == 0 {
        return Err(ConfigError::Validation(
            "default-max-pages must be at least 1".to_string(),
        ));
    }

    if config.crawler.fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch-timeout-secs must be at least 1".to_string(),
        ));
    }

    if config.crawler.retry_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "retry-attempts must be at most 10, got {}",
            config.crawler.retry_attempts
        )));
    }

    if config.output.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{CrawlerConfig, OutputConfig};

    fn valid_config() -> Config {
        Config {
            crawler: CrawlerConfig::default(),
            output: OutputConfig {
                database_path: "./tasks.db".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = valid_config();
        config.crawler.default_max_pages = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.crawler.fetch_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_retries_rejected() {
        let mut config = valid_config();
        config.crawler.retry_attempts = 11;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_database_path_rejected() {
        let mut config = valid_config();
        config.output.database_path = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_depth_allowed() {
        // Depth 0 is a valid budget that fetches nothing (depth 1 is seed-only).
        let mut config = valid_config();
        config.crawler.default_depth = 0;
        assert!(validate(&config).is_ok());
    }
}
