//! Crawler module for depth-one page fetching and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with status and Content-Type validation
//! - Token-driven HTML parsing for text and link extraction
//! - Orchestration of the start page and its same-site links

mod coordinator;
mod extractor;
mod fetcher;
mod outcome;

pub use coordinator::{filter_links, run_crawl, Coordinator, CrawlRequest, LinkFilter};
pub use extractor::{
    extract, tokenize, Extraction, ExtractionMode, HtmlEventSink, LinkTextCollector,
};
pub use fetcher::{build_http_client, AbsentReason, FetchResult, HttpFetcher, PageFetcher};
pub use outcome::{CrawlOutcome, CrawledPages};

