use crate::crawler::CrawlOutcome;
use std::fmt;

/// Human-readable report for one outcome
///
/// Content mode prints the extracted text; link-crawl mode prints the page
/// count, one `URL:` line per fetched page, then the count again.
pub struct Report<'a>(pub &'a CrawlOutcome);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            CrawlOutcome::Failed { url, reason, .. } => {
                writeln!(f, "Start page unavailable: {} ({})", url, reason)
            }
            CrawlOutcome::Content(content) => writeln!(f, "Fetched content: {}", content),
            CrawlOutcome::Empty { mode } if mode.collects_text() => {
                writeln!(f, "Fetched content: (none)")
            }
            CrawlOutcome::Empty { .. } => writeln!(f, "Total: 0"),
            CrawlOutcome::Pages(pages) => {
                writeln!(f, "Total: {}", pages.len())?;
                for url in pages.urls() {
                    writeln!(f, "URL: {}", url)?;
                }
                writeln!(f, "Total: {}", pages.len())
            }
        }
    }
}

/// Renders the report for an outcome into a string
pub fn format_report(outcome: &CrawlOutcome) -> String {
    Report(outcome).to_string()
}

/// Prints the report to stdout
pub fn print_report(outcome: &CrawlOutcome) {
    print!("{}", Report(outcome));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::{AbsentReason, CrawledPages, ExtractionMode};
    use url::Url;

    #[test]
    fn test_content_report() {
        let report = format_report(&CrawlOutcome::Content("Hello world".to_string()));
        assert_eq!(report, "Fetched content: Hello world\n");
    }

    #[test]
    fn test_pages_report() {
        let mut pages = CrawledPages::new();
        pages.insert(Url::parse("https://example.com/b").unwrap(), "<p>b</p>".to_string());
        pages.insert(Url::parse("https://example.com/c").unwrap(), "<p>c</p>".to_string());

        let report = format_report(&CrawlOutcome::Pages(pages));

        assert_eq!(
            report,
            "Total: 2\nURL: https://example.com/b\nURL: https://example.com/c\nTotal: 2\n"
        );
    }

    #[test]
    fn test_empty_reports() {
        let content = format_report(&CrawlOutcome::Empty {
            mode: ExtractionMode::Content,
        });
        assert_eq!(content, "Fetched content: (none)\n");

        let links = format_report(&CrawlOutcome::Empty {
            mode: ExtractionMode::from_target(Some("id")),
        });
        assert_eq!(links, "Total: 0\n");
    }

    #[test]
    fn test_failed_report() {
        let report = format_report(&CrawlOutcome::Failed {
            url: Url::parse("https://example.com/a").unwrap(),
            reason: AbsentReason::NonSuccessStatus(404),
            mode: ExtractionMode::Content,
        });
        assert_eq!(
            report,
            "Start page unavailable: https://example.com/a (HTTP 404)\n"
        );
    }
}
