use crate::crawler::CrawlOutcome;
use serde::Serialize;

/// Serializable view of a crawl outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlResponse {
    /// `content` or `links`
    pub mode: &'static str,

    pub status: ResponseStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<PageEntry>>,

    /// Why the start page was unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    pub url: String,
    pub html: String,
}

impl From<&CrawlOutcome> for CrawlResponse {
    fn from(outcome: &CrawlOutcome) -> Self {
        match outcome {
            CrawlOutcome::Failed { url, reason, mode } => Self {
                mode: mode.as_str(),
                status: ResponseStatus::Failed,
                content: None,
                pages: None,
                error: Some(format!("{}: {}", url, reason)),
            },
            CrawlOutcome::Empty { mode } => Self {
                mode: mode.as_str(),
                status: ResponseStatus::Empty,
                content: None,
                pages: (!mode.collects_text()).then(Vec::new),
                error: None,
            },
            CrawlOutcome::Content(content) => Self {
                mode: "content",
                status: ResponseStatus::Ok,
                content: Some(content.clone()),
                pages: None,
                error: None,
            },
            CrawlOutcome::Pages(pages) => Self {
                mode: "links",
                status: ResponseStatus::Ok,
                content: None,
                pages: Some(
                    pages
                        .iter()
                        .map(|(url, html)| PageEntry {
                            url: url.to_string(),
                            html: html.to_string(),
                        })
                        .collect(),
                ),
                error: None,
            },
        }
    }
}
