//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests to fetch page content
//! - Status and Content-Type validation
//! - Transport error classification

use crate::config::{FetcherConfig, UserAgentConfig};
use crate::url::SECURE_SCHEME;
use crate::SkimError;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, StatusCode};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Content-Type substring that marks a response as HTML
const HTML_CONTENT_TYPE: &str = "text/html";

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Status 200 with an HTML body
    Html {
        /// Page body content
        body: String,
        /// Content-Type header value
        content_type: String,
    },

    /// The page is not usable; the caller treats every reason the same way
    Absent(AbsentReason),
}

/// Why a fetch produced no HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    /// Any status other than exactly 200, redirects included
    NonSuccessStatus(u16),

    /// Status 200 but the Content-Type does not contain `text/html`
    NonHtml {
        /// The Content-Type received, empty when the header was missing
        content_type: String,
    },
}

impl FetchResult {
    /// Returns the HTML body, or None if the page was absent
    pub fn into_html(self) -> Option<String> {
        match self {
            Self::Html { body, .. } => Some(body),
            Self::Absent(_) => None,
        }
    }

    /// Returns true if the page was fetched as HTML
    pub fn is_html(&self) -> bool {
        matches!(self, Self::Html { .. })
    }
}

impl fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonSuccessStatus(status) => write!(f, "HTTP {}", status),
            Self::NonHtml { content_type } if content_type.is_empty() => {
                write!(f, "missing Content-Type")
            }
            Self::NonHtml { content_type } => write!(f, "expected HTML, got {}", content_type),
        }
    }
}

/// The network side of a crawl: one GET plus validation per call
///
/// Implementations must not retry and must not cache; the coordinator relies
/// on every call reflecting a single request.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its HTML body, or the reason it is absent
    ///
    /// Transport failures (DNS, connect, TLS, timeout) are returned as errors
    /// rather than folded into `Absent`.
    async fn fetch(&self, url: &Url) -> Result<FetchResult, SkimError>;
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are not followed: a 3xx response is reported as a non-200
/// status, which also keeps a redirect from leaving the start page's domain.
///
/// # Arguments
///
/// * `fetcher` - Timeout and scheme settings
/// * `user_agent` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use skimmer::config::{FetcherConfig, UserAgentConfig};
/// use skimmer::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    fetcher: &FetcherConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetcher.timeout_secs))
        .connect_timeout(Duration::from_secs(fetcher.connect_timeout_secs))
        .redirect(Policy::none())
        .https_only(fetcher.https_only)
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed [`PageFetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    https_only: bool,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(fetcher: &FetcherConfig, user_agent: &UserAgentConfig) -> Result<Self, SkimError> {
        let client = build_http_client(fetcher, user_agent)?;
        Ok(Self::with_client(client, fetcher.https_only))
    }

    /// Wraps an existing client
    pub fn with_client(client: Client, https_only: bool) -> Self {
        Self { client, https_only }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResult, SkimError> {
        if self.https_only && url.scheme() != SECURE_SCHEME {
            return Err(SkimError::InsecureScheme {
                url: url.to_string(),
            });
        }

        tracing::info!("fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_transport_error(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!("{} returned HTTP {}", url, status.as_u16());
            return Ok(FetchResult::Absent(AbsentReason::NonSuccessStatus(
                status.as_u16(),
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains(HTML_CONTENT_TYPE) {
            tracing::debug!("{} is not HTML ({:?})", url, content_type);
            return Ok(FetchResult::Absent(AbsentReason::NonHtml { content_type }));
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(url, e))?;

        Ok(FetchResult::Html { body, content_type })
    }
}

/// Maps a reqwest failure onto the crate's transport error variants
fn classify_transport_error(url: &Url, error: reqwest::Error) -> SkimError {
    if error.is_timeout() {
        SkimError::Timeout {
            url: url.to_string(),
        }
    } else {
        SkimError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
