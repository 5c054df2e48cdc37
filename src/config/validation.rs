use crate::config::types::{ChartConfig, Config, HttpConfig, ResolverConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_chart_config(&config.chart)?;
    validate_resolver_config(&config.resolver)?;
    Ok(())
}

/// Validates HTTP access layer configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > 30 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and 30, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 120, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    if config.backoff_ms < 1 {
        return Err(ConfigError::Validation(
            "backoff_ms must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates chart source configuration
fn validate_chart_config(config: &ChartConfig) -> Result<(), ConfigError> {
    validate_http_url("base_url", &config.base_url)?;

    if config.default_size < 1 || config.default_size > 100 {
        return Err(ConfigError::Validation(format!(
            "default_size must be between 1 and 100, got {}",
            config.default_size
        )));
    }

    Ok(())
}

/// Validates link resolver configuration
fn validate_resolver_config(config: &ResolverConfig) -> Result<(), ConfigError> {
    validate_http_url("catalog_url", &config.catalog_url)?;
    validate_http_url("crosslink_url", &config.crosslink_url)?;
    validate_http_url("search_base_url", &config.search_base_url)?;

    if config.platform.is_empty() {
        return Err(ConfigError::Validation(
            "platform cannot be empty".to_string(),
        ));
    }

    if config.catalog_country.is_empty() {
        return Err(ConfigError::Validation(
            "catalog_country cannot be empty".to_string(),
        ));
    }

    if config.provider_timeout_secs < 1 || config.provider_timeout_secs > 60 {
        return Err(ConfigError::Validation(format!(
            "provider_timeout_secs must be between 1 and 60, got {}",
            config.provider_timeout_secs
        )));
    }

    Ok(())
}

/// Validates that a config value parses as an absolute http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} must use an http or https scheme, got '{}'",
            field,
            url.scheme()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = Config::default();
        config.http.user_agent = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_connect_timeout_rejected() {
        let mut config = Config::default();
        config.http.connect_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_retries_rejected() {
        let mut config = Config::default();
        config.http.max_retries = 11;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut config = Config::default();
        config.chart.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = Config::default();
        config.resolver.crosslink_url = "ftp://links.example.com/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_size_bounds() {
        let mut config = Config::default();
        config.chart.default_size = 0;
        assert!(validate(&config).is_err());

        config.chart.default_size = 101;
        assert!(validate(&config).is_err());

        config.chart.default_size = 100;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_platform_rejected() {
        let mut config = Config::default();
        config.resolver.platform = String::new();
        assert!(validate(&config).is_err());
    }
}
