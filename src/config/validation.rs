use crate::config::types::{Config, CookieConfig, CrawlConfig, RendererConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    if let Some(cookie) = &config.cookie {
        validate_cookie(cookie)?;
    }
    validate_renderer_config(&config.renderer)?;
    Ok(())
}

/// Validates the crawl section
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    validate_seed_url(&config.url)?;

    if config.match_pattern.is_empty() {
        return Err(ConfigError::Validation(
            "match pattern cannot be empty".to_string(),
        ));
    }

    validate_selector(&config.selector)?;

    if config.max_pages_to_crawl < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages_to_crawl must be >= 1, got {}",
            config.max_pages_to_crawl
        )));
    }

    if config.output_file_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output_file_name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Seed must be an absolute http(s) URL
fn validate_seed_url(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use HTTP or HTTPS scheme",
            seed
        )));
    }

    Ok(())
}

fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector(
            "selector cannot be empty".to_string(),
        ));
    }

    if Selector::parse(selector).is_err() {
        return Err(ConfigError::InvalidSelector(format!(
            "'{}' is not a valid CSS selector",
            selector
        )));
    }

    Ok(())
}

fn validate_cookie(cookie: &CookieConfig) -> Result<(), ConfigError> {
    if cookie.name.is_empty() {
        return Err(ConfigError::Validation(
            "cookie name cannot be empty".to_string(),
        ));
    }

    // Name must be a valid cookie token
    if cookie
        .name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || "=;,".contains(c))
    {
        return Err(ConfigError::Validation(format!(
            "cookie name '{}' contains invalid characters",
            cookie.name
        )));
    }

    if cookie.value.contains(';') {
        return Err(ConfigError::Validation(
            "cookie value cannot contain ';'".to_string(),
        ));
    }

    Ok(())
}

fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.navigation_timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "navigation_timeout_ms must be >= 1ms, got {}ms",
            config.navigation_timeout_ms
        )));
    }

    if config.selector_timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "selector_timeout_ms must be >= 1ms, got {}ms",
            config.selector_timeout_ms
        )));
    }

    Ok(())
}
