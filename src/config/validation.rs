use crate::config::types::{Config, CrawlConfig, FetcherConfig, UserAgentConfig};
use crate::url::SECURE_SCHEME;
use crate::ConfigError;
use url::Url;

/// Upper bound on concurrent link fetches against a single host
const MAX_CONCURRENT_FETCHES: usize = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_crawl_config(&config.crawl, config.fetcher.https_only)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > MAX_CONCURRENT_FETCHES
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES, config.max_concurrent_fetches
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
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

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the crawl section; the start URL is optional here because the
/// command line may supply it
fn validate_crawl_config(config: &CrawlConfig, https_only: bool) -> Result<(), ConfigError> {
    if let Some(start_url) = &config.start_url {
        validate_start_url(start_url, https_only)?;
    }

    for (key, patterns) in [
        ("url-patterns", &config.url_patterns),
        ("content-patterns", &config.content_patterns),
    ] {
        if patterns.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{} cannot contain an empty pattern",
                key
            )));
        }
    }

    for ignored in &config.ignored_urls {
        parse_ignored_url(ignored)?;
    }

    Ok(())
}

/// Parses one entry of `ignored-urls`
pub fn parse_ignored_url(ignored: &str) -> Result<Url, ConfigError> {
    Url::parse(ignored)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid ignored URL '{}': {}", ignored, e)))
}

/// Parses a start URL and checks its scheme
pub fn validate_start_url(start_url: &str, https_only: bool) -> Result<Url, ConfigError> {
    let url = Url::parse(start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start URL '{}': {}", start_url, e)))?;

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Start URL '{}' has no host",
            start_url
        )));
    }

    if https_only && url.scheme() != SECURE_SCHEME {
        return Err(ConfigError::Validation(format!(
            "Start URL '{}' must use HTTPS scheme",
            start_url
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_timeouts() {
        let mut config = Config::default();
        config.fetcher.timeout_secs = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.fetcher.connect_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_concurrency_bounds() {
        let mut config = Config::default();
        config.fetcher.max_concurrent_fetches = 32;
        assert!(validate(&config).is_ok());

        config.fetcher.max_concurrent_fetches = 33;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_crawler_name() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "Bad Name!".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = "good-name-2".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_start_url() {
        assert!(validate_start_url("https://example.com/a", true).is_ok());
        assert!(validate_start_url("http://example.com/a", false).is_ok());

        assert!(matches!(
            validate_start_url("http://example.com/a", true),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            validate_start_url("not a url", true),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_start_url("mailto:someone@example.com", false),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_patterns() {
        let mut config = Config::default();
        config.crawl.url_patterns = vec!["tax".to_string()];
        config.crawl.content_patterns = vec!["Budget".to_string()];
        assert!(validate(&config).is_ok());

        config.crawl.url_patterns.push(String::new());
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        let mut config = Config::default();
        config.crawl.content_patterns = vec![String::new()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_ignored_urls() {
        let mut config = Config::default();
        config.crawl.ignored_urls = vec!["https://example.com/skip".to_string()];
        assert!(validate(&config).is_ok());

        config.crawl.ignored_urls.push("/relative".to_string());
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }
}
