use super::Config;
use crate::constants::{MAX_HTTP_TIMEOUT_SECONDS, polling};
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API key cannot be empty
/// - Base URL must start with http:// or https:// and have a host part
/// - Timeout, retry attempts and cache capacity must be non-zero
/// - Timeout must not exceed `MAX_HTTP_TIMEOUT_SECONDS`
/// - Live refresh interval must stay within the polling bounds
/// - If log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.api_key.trim().is_empty() {
        return Err(AppError::config_error(
            "API key cannot be empty. Set it in the config file or SPORTRADAR_API_KEY",
        ));
    }

    let host = config
        .api_base_url
        .strip_prefix("https://")
        .or_else(|| config.api_base_url.strip_prefix("http://"));
    match host {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') => {}
        _ => {
            return Err(AppError::config_error(format!(
                "API base URL must be an http(s) URL: '{}'",
                config.api_base_url
            )));
        }
    }

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error("HTTP timeout must be at least 1 second"));
    }

    if config.http_timeout_seconds > MAX_HTTP_TIMEOUT_SECONDS {
        return Err(AppError::config_error(format!(
            "HTTP timeout must be at most {MAX_HTTP_TIMEOUT_SECONDS} seconds"
        )));
    }

    if config.retry_attempts == 0 {
        return Err(AppError::config_error("Retry attempts must be at least 1"));
    }

    if config.cache_capacity == 0 {
        return Err(AppError::config_error("Cache capacity must be at least 1"));
    }

    if !(polling::MIN_LIVE_REFRESH_SECONDS..=polling::MAX_LIVE_REFRESH_SECONDS)
        .contains(&config.live_refresh_seconds)
    {
        return Err(AppError::config_error(format!(
            "Live refresh interval must be between {} and {} seconds",
            polling::MIN_LIVE_REFRESH_SECONDS,
            polling::MAX_LIVE_REFRESH_SECONDS
        )));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn valid_config() -> Config {
        Config {
            api_key: "test-key".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_configs() {
        assert!(validate_config(&valid_config()).is_ok());

        let local = Config {
            api_base_url: "http://localhost:8080".to_string(),
            ..valid_config()
        };
        assert!(validate_config(&local).is_ok());

        let temp_dir = tempdir().unwrap();
        let log_path = temp_dir.path().join("logs").join("app.log");
        let with_log = Config {
            log_file_path: Some(log_path.to_string_lossy().to_string()),
            ..valid_config()
        };
        assert!(validate_config(&with_log).is_ok());
        assert!(temp_dir.path().join("logs").exists());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let config = Config {
            api_key: "   ".to_string(),
            ..valid_config()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("API key cannot be empty"));
    }

    #[test]
    fn test_bad_base_urls_rejected() {
        for url in ["", "api.example.com", "ftp://api.example.com", "https://", "https:///path"] {
            let config = Config {
                api_base_url: url.to_string(),
                ..valid_config()
            };
            assert!(validate_config(&config).is_err(), "{url} should be rejected");
        }
    }

    #[test]
    fn test_oversized_timeout_rejected() {
        let at_limit = Config {
            http_timeout_seconds: MAX_HTTP_TIMEOUT_SECONDS,
            ..valid_config()
        };
        assert!(validate_config(&at_limit).is_ok());

        for seconds in [MAX_HTTP_TIMEOUT_SECONDS + 1, u64::MAX] {
            let config = Config {
                http_timeout_seconds: seconds,
                ..valid_config()
            };
            let err = validate_config(&config).unwrap_err();
            assert!(err.to_string().contains("at most"), "{seconds}");
        }
    }

    #[test]
    fn test_zero_values_rejected() {
        let no_timeout = Config {
            http_timeout_seconds: 0,
            ..valid_config()
        };
        assert!(validate_config(&no_timeout).is_err());

        let no_attempts = Config {
            retry_attempts: 0,
            ..valid_config()
        };
        assert!(validate_config(&no_attempts).is_err());

        let no_cache = Config {
            cache_capacity: 0,
            ..valid_config()
        };
        assert!(validate_config(&no_cache).is_err());
    }

    #[test]
    fn test_live_refresh_bounds() {
        let too_fast = Config {
            live_refresh_seconds: 5,
            ..valid_config()
        };
        assert!(validate_config(&too_fast).is_err());

        let too_slow = Config {
            live_refresh_seconds: 301,
            ..valid_config()
        };
        assert!(validate_config(&too_slow).is_err());

        let edge = Config {
            live_refresh_seconds: 10,
            ..valid_config()
        };
        assert!(validate_config(&edge).is_ok());
    }

    #[test]
    fn test_empty_log_path_rejected() {
        let config = Config {
            log_file_path: Some(String::new()),
            ..valid_config()
        };
        assert!(validate_config(&config).is_err());
    }
}
