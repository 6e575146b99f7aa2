//! Crawl result types

use crate::crawler::extractor::ExtractionMode;
use crate::crawler::fetcher::AbsentReason;
use indexmap::IndexMap;
use url::Url;

/// Result of one orchestrated crawl
///
/// Failure to obtain the start page and a successful crawl that found
/// nothing are separate variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The start page was not usable HTML; nothing else was fetched
    Failed {
        url: Url,
        reason: AbsentReason,
        mode: ExtractionMode,
    },

    /// The start page was fetched but yielded no text (content mode) or no
    /// linked page could be collected (link-crawl mode)
    Empty { mode: ExtractionMode },

    /// Concatenated visible text of the start page
    Content(String),

    /// Linked pages that were fetched as HTML
    Pages(CrawledPages),
}

impl CrawlOutcome {
    /// Returns true if the start page could not be used
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Number of pages collected in link-crawl mode
    pub fn page_count(&self) -> usize {
        match self {
            Self::Pages(pages) => pages.len(),
            _ => 0,
        }
    }
}

/// Mapping from absolute URL to raw HTML body
///
/// Keys are unique; iteration follows insertion order, which the coordinator
/// keeps equal to the document order of the start page's links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawledPages {
    pages: IndexMap<Url, String>,
}

impl CrawledPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a page, replacing the body of an existing entry for the same
    /// URL in place. Returns true if the URL was new.
    pub fn insert(&mut self, url: Url, html: String) -> bool {
        self.pages.insert(url, html).is_none()
    }

    /// Raw HTML stored for `url`, if it was collected
    pub fn get(&self, url: &Url) -> Option<&str> {
        self.pages.get(url).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages as `(url, html)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Url, &str)> {
        self.pages.iter().map(|(url, html)| (url, html.as_str()))
    }

    /// Collected URLs in insertion order
    pub fn urls(&self) -> impl Iterator<Item = &Url> {
        self.pages.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut pages = CrawledPages::new();
        assert!(pages.insert(url("https://example.com/b"), "<p>b</p>".to_string()));

        assert_eq!(pages.len(), 1);
        assert_eq!(pages.get(&url("https://example.com/b")), Some("<p>b</p>"));
        assert_eq!(pages.get(&url("https://example.com/c")), None);
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let mut pages = CrawledPages::new();
        pages.insert(url("https://example.com/b"), "first".to_string());
        pages.insert(url("https://example.com/c"), "c".to_string());
        assert!(!pages.insert(url("https://example.com/b"), "second".to_string()));

        assert_eq!(pages.len(), 2);
        assert_eq!(pages.get(&url("https://example.com/b")), Some("second"));
        let order: Vec<&str> = pages.urls().map(Url::as_str).collect();
        assert_eq!(order, vec!["https://example.com/b", "https://example.com/c"]);
    }

    #[test]
    fn test_page_count() {
        let mut pages = CrawledPages::new();
        pages.insert(url("https://example.com/b"), String::new());

        assert_eq!(CrawlOutcome::Pages(pages).page_count(), 1);
        assert_eq!(CrawlOutcome::Content("text".to_string()).page_count(), 0);
        assert!(!CrawlOutcome::Empty {
            mode: ExtractionMode::Content
        }
        .is_failed());
    }
}
