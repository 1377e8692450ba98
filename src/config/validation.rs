use crate::config::types::{
    Config, DiscoveryConfig, EnhancementConfig, ScanConfig, TargetConfig, UserAgentConfig,
};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Longest politeness delay accepted from configuration (milliseconds)
const MAX_CRAWL_DELAY_MS: u64 = 10_000;

/// Deepest sitemap index nesting accepted from configuration
const MAX_SITEMAP_DEPTH: usize = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_target_config(&config.target)?;
    validate_discovery_config(&config.discovery)?;
    validate_scan_config(&config.scan)?;
    validate_user_agent_config(&config.user_agent)?;
    if let Some(enhancement) = &config.enhancement {
        validate_enhancement_config(enhancement)?;
    }

    if config.output.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_target_config(config: &TargetConfig) -> ConfigResult<()> {
    validate_http_url("base_url", &config.base_url)
}

fn validate_discovery_config(config: &DiscoveryConfig) -> ConfigResult<()> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.crawl_budget < 1 {
        return Err(ConfigError::Validation(format!(
            "crawl_budget must be >= 1, got {}",
            config.crawl_budget
        )));
    }

    if config.crawl_delay_ms > MAX_CRAWL_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "crawl_delay_ms must be <= {}ms, got {}ms",
            MAX_CRAWL_DELAY_MS, config.crawl_delay_ms
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.max_sitemap_depth < 1 || config.max_sitemap_depth > MAX_SITEMAP_DEPTH {
        return Err(ConfigError::Validation(format!(
            "max_sitemap_depth must be between 1 and {}, got {}",
            MAX_SITEMAP_DEPTH, config.max_sitemap_depth
        )));
    }

    Ok(())
}

fn validate_scan_config(config: &ScanConfig) -> ConfigResult<()> {
    validate_http_url("engine_url", &config.engine_url)?;

    if !matches!(config.wcag_level.as_str(), "A" | "AA" | "AAA") {
        return Err(ConfigError::Validation(format!(
            "wcag_level must be one of A, AA, AAA, got '{}'",
            config.wcag_level
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "scan timeout_secs must be >= 1".to_string(),
        ));
    }

    for name in config.custom_headers.keys() {
        validate_header_name(name)?;
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact) = &config.contact_url {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

fn validate_enhancement_config(config: &EnhancementConfig) -> ConfigResult<()> {
    validate_http_url("enhancement api_url", &config.api_url)?;

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "enhancement timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Requires an absolute http(s) URL with a host
fn validate_http_url(field: &str, value: &str) -> ConfigResult<()> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
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

    Ok(())
}

/// HTTP header names are RFC 7230 tokens
fn validate_header_name(name: &str) -> ConfigResult<()> {
    const TOKEN_EXTRAS: &str = "!#$%&'*+-.^_`|~";

    if name.is_empty() || !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || TOKEN_EXTRAS.contains(c))
    {
        return Err(ConfigError::Validation(format!(
            "Invalid custom header name: '{}'",
            name
        )));
    }

    Ok(())
}
