//! Crawler coordinator - depth-one crawl orchestration
//!
//! A crawl moves through these phases, with no state kept between calls:
//!
//! `Init → FetchedStart → {ContentDone | LinksExtracted → FetchingLinks → Done}`
//!
//! The start page is fetched and parsed once. In content mode its text is the
//! result. In link-crawl mode every `href` is resolved against the start URL,
//! filtered down to same-authority `https` links, and each survivor is fetched
//! once; only HTML responses are kept.

use crate::config::{parse_ignored_url, validate_start_url, Config, CrawlConfig};
use crate::crawler::extractor::{extract, ExtractionMode};
use crate::crawler::fetcher::{FetchResult, HttpFetcher, PageFetcher};
use crate::crawler::outcome::{CrawlOutcome, CrawledPages};
use crate::url::{authority, is_same_site_https, resolve_link};
use crate::{ConfigError, SkimError, UrlError};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use url::Url;

/// Which resolved same-site links may be fetched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    /// Substrings of which a link must contain at least one (empty = any)
    pub url_patterns: Vec<String>,

    /// Links that are never fetched
    pub ignored_urls: Vec<Url>,
}

impl LinkFilter {
    /// Returns true if `url` is not ignored and matches a URL pattern
    pub fn allows(&self, url: &Url) -> bool {
        if self.ignored_urls.contains(url) {
            return false;
        }

        self.url_patterns.is_empty()
            || self
                .url_patterns
                .iter()
                .any(|pattern| url.as_str().contains(pattern.as_str()))
    }
}

/// Parameters of one crawl, fixed for its whole duration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// Absolute URL of the start page
    pub start_url: Url,

    /// Reserved element identifier; its presence selects link-crawl mode
    pub target_id: Option<String>,

    /// Maximum number of linked pages to fetch (0 = unlimited)
    pub max_links: usize,

    /// Narrows the same-site links that are fetched
    pub link_filter: LinkFilter,

    /// A linked page is kept only if its body contains one of these
    /// (empty = keep every HTML page)
    pub content_patterns: Vec<String>,
}

impl CrawlRequest {
    /// Creates an unfiltered, unlimited request
    pub fn new(start_url: Url, target_id: Option<String>) -> Self {
        Self {
            start_url,
            target_id,
            max_links: 0,
            link_filter: LinkFilter::default(),
            content_patterns: Vec::new(),
        }
    }

    pub fn with_max_links(mut self, max_links: usize) -> Self {
        self.max_links = max_links;
        self
    }

    pub fn with_link_filter(mut self, link_filter: LinkFilter) -> Self {
        self.link_filter = link_filter;
        self
    }

    pub fn with_content_patterns(mut self, content_patterns: Vec<String>) -> Self {
        self.content_patterns = content_patterns;
        self
    }

    /// Builds a request from the `[crawl]` section of a configuration
    pub fn from_config(crawl: &CrawlConfig, https_only: bool) -> Result<Self, ConfigError> {
        let start_url = crawl.start_url.as_deref().ok_or_else(|| {
            ConfigError::Validation("a start URL is required".to_string())
        })?;
        let start_url = validate_start_url(start_url, https_only)?;

        let ignored_urls = crawl
            .ignored_urls
            .iter()
            .map(String::as_str)
            .map(parse_ignored_url)
            .collect::<Result<Vec<_>, _>>()?;
        let link_filter = LinkFilter {
            url_patterns: crawl.url_patterns.clone(),
            ignored_urls,
        };

        Ok(Self::new(start_url, crawl.target_id.clone())
            .with_max_links(crawl.max_links)
            .with_link_filter(link_filter)
            .with_content_patterns(crawl.content_patterns.clone()))
    }

    /// Extraction mode selected by the target identifier
    pub fn mode(&self) -> ExtractionMode {
        ExtractionMode::from_target(self.target_id.as_deref())
    }

    /// Returns true if a linked page body satisfies the content patterns
    fn wants_content(&self, body: &str) -> bool {
        self.content_patterns.is_empty()
            || self
                .content_patterns
                .iter()
                .any(|pattern| body.contains(pattern.as_str()))
    }
}

/// Resolves raw links against `base` and keeps those that may be fetched
///
/// A link survives when it resolves, its scheme is `https`, its authority
/// equals `domain` and `filter` allows it. Repeated URLs are kept once, at
/// their first position.
pub fn filter_links(
    links: &[String],
    base: &Url,
    domain: &str,
    filter: &LinkFilter,
) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for link in links {
        let resolved = match resolve_link(link, base) {
            Some(url) => url,
            None => continue,
        };

        if !is_same_site_https(&resolved, domain) {
            tracing::trace!("Skipping off-site or insecure link {}", resolved);
            continue;
        }

        if !filter.allows(&resolved) {
            tracing::trace!("Skipping filtered link {}", resolved);
            continue;
        }

        if seen.insert(resolved.clone()) {
            kept.push(resolved);
        }
    }

    kept
}

/// Main crawler coordinator structure
pub struct Coordinator<F = HttpFetcher> {
    fetcher: F,
    max_concurrent_fetches: usize,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator backed by a real HTTP client
    pub fn from_config(config: &Config) -> Result<Self, SkimError> {
        let fetcher = HttpFetcher::new(&config.fetcher, &config.user_agent)?;
        Ok(Self::new(fetcher).with_max_concurrent_fetches(config.fetcher.max_concurrent_fetches))
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a sequential coordinator around any fetcher
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            max_concurrent_fetches: 1,
        }
    }

    /// Allows up to `limit` linked pages to be in flight at once
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    /// The fetcher every request goes through
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs one depth-one crawl
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome::Failed)` - The start page was not 200 HTML
    /// * `Ok(CrawlOutcome::Empty)` - Nothing to report
    /// * `Ok(CrawlOutcome::Content | Pages)` - Extracted text or fetched pages
    /// * `Err(SkimError)` - Transport failure on the start page; failures on
    ///   linked pages are logged and skipped
    pub async fn crawl(&self, request: &CrawlRequest) -> Result<CrawlOutcome, SkimError> {
        let start_url = &request.start_url;
        let domain = authority(start_url).ok_or(UrlError::MissingDomain)?;
        let mode = request.mode();

        let html = match self.fetcher.fetch(start_url).await? {
            FetchResult::Html { body, .. } => body,
            FetchResult::Absent(reason) => {
                tracing::warn!("Start page {} unavailable: {}", start_url, reason);
                return Ok(CrawlOutcome::Failed {
                    url: start_url.clone(),
                    reason,
                    mode,
                });
            }
        };
        tracing::debug!("Fetched start page {} ({} bytes)", start_url, html.len());

        let extraction = extract(&html, &mode);

        if mode.collects_text() {
            return Ok(match extraction.content {
                Some(content) => CrawlOutcome::Content(content),
                None => CrawlOutcome::Empty { mode },
            });
        }

        let mut targets =
            filter_links(&extraction.links, start_url, &domain, &request.link_filter);
        tracing::info!(
            "Found {} links on {}, {} on {} over https (target id {:?} is reserved)",
            extraction.links.len(),
            start_url,
            targets.len(),
            domain,
            request.target_id
        );

        if request.max_links > 0 && targets.len() > request.max_links {
            tracing::info!(
                "Limiting fetch set from {} to {} links",
                targets.len(),
                request.max_links
            );
            targets.truncate(request.max_links);
        }

        let pages = self.fetch_linked_pages(request, targets).await;

        if pages.is_empty() {
            Ok(CrawlOutcome::Empty { mode })
        } else {
            Ok(CrawlOutcome::Pages(pages))
        }
    }

    /// Fetches each target, keeping HTML responses in target order
    async fn fetch_linked_pages(
        &self,
        request: &CrawlRequest,
        targets: Vec<Url>,
    ) -> CrawledPages {
        let fetcher = &self.fetcher;
        let total = targets.len();

        let results: Vec<(Url, Result<FetchResult, SkimError>)> = stream::iter(targets)
            .map(|url| async move {
                let result = fetcher.fetch(&url).await;
                (url, result)
            })
            .buffered(self.max_concurrent_fetches)
            .collect()
            .await;

        let mut pages = CrawledPages::new();
        for (url, result) in results {
            match result {
                Ok(FetchResult::Html { body, .. }) if request.wants_content(&body) => {
                    pages.insert(url, body);
                }
                Ok(FetchResult::Html { .. }) => {
                    tracing::debug!("Skipping {}: no content pattern matched", url);
                }
                Ok(FetchResult::Absent(reason)) => {
                    tracing::debug!("Skipping {}: {}", url, reason);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", url, e);
                }
            }
        }

        tracing::info!("Collected {} of {} linked pages", pages.len(), total);
        pages
    }
}

/// Runs a complete crawl from configuration
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, SkimError> {
    let request = CrawlRequest::from_config(&config.crawl, config.fetcher.https_only)?;
    let coordinator = Coordinator::from_config(config)?;
    coordinator.crawl(&request).await
}
