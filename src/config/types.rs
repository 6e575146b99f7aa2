use serde::Deserialize;

/// Main configuration structure for Skimmer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Parameters of a single crawl run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlConfig {
    /// Absolute URL of the start page
    #[serde(rename = "start-url", default)]
    pub start_url: Option<String>,

    /// Reserved element identifier; when present, links are crawled instead of
    /// extracting the start page's text
    #[serde(rename = "target-id", default)]
    pub target_id: Option<String>,

    /// Maximum number of linked pages to fetch (0 = unlimited)
    #[serde(rename = "max-links", default)]
    pub max_links: usize,

    /// Linked URLs must contain at least one of these substrings (empty = any)
    #[serde(rename = "url-patterns", default)]
    pub url_patterns: Vec<String>,

    /// Linked page bodies must contain at least one of these substrings
    /// (empty = any)
    #[serde(rename = "content-patterns", default)]
    pub content_patterns: Vec<String>,

    /// Linked URLs that are never fetched
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Total time allowed for one request, in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Time allowed to establish a connection, in seconds
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,

    /// Number of linked pages fetched at the same time
    #[serde(
        rename = "max-concurrent-fetches",
        default = "default_max_concurrent_fetches"
    )]
    pub max_concurrent_fetches: usize,

    /// Refuse to issue requests to anything but https URLs
    #[serde(rename = "https-only", default = "default_https_only")]
    pub https_only: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value: `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            https_only: default_https_only(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_concurrent_fetches() -> usize {
    1
}

fn default_https_only() -> bool {
    true
}

fn default_crawler_name() -> String {
    "Skimmer".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
