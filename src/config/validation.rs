use crate::config::types::{Config, OutputConfig, SiteConfig, TimingConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_timing_config(&config.timing)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site section: both URLs are http(s) on the same host
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = parse_http_url("base-url", &config.base_url)?;
    let target = parse_http_url("target-category-url", &config.target_category_url)?;

    if base.host_str() != target.host_str() {
        return Err(ConfigError::Validation(format!(
            "target-category-url host {:?} does not match base-url host {:?}",
            target.host_str(),
            base.host_str()
        )));
    }

    Ok(())
}

fn parse_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            field, value
        )));
    }

    Ok(url)
}

/// Validates timing configuration
fn validate_timing_config(config: &TimingConfig) -> Result<(), ConfigError> {
    check_range(
        "element-wait-timeout",
        config.element_wait_timeout,
        1_000,
        120_000,
    )?;
    check_range(
        "navigation-timeout",
        config.navigation_timeout,
        1_000,
        300_000,
    )?;
    check_range("reveal-settle-delay", config.reveal_settle_delay, 0, 30_000)?;
    check_range(
        "max-reveal-iterations",
        config.max_reveal_iterations as u64,
        1,
        500,
    )?;
    check_range("node-retries", config.node_retries as u64, 0, 5)?;

    if config.crawl_timeout == Some(0) {
        return Err(ConfigError::Validation(
            "crawl-timeout must be at least 1 second when set".to_string(),
        ));
    }

    Ok(())
}

fn check_range(field: &str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::Validation(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.json_path.as_deref() == Some("") {
        return Err(ConfigError::Validation(
            "json-path cannot be empty".to_string(),
        ));
    }

    if config.summary_path.as_deref() == Some("") {
        return Err(ConfigError::Validation(
            "summary-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
