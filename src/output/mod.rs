//! Output module for presenting crawl outcomes
//!
//! This module handles:
//! - The plain-text report printed by the command line tool
//! - The JSON response schema `{mode, status, content?, pages?, error?}`

mod report;
mod response;

pub use report::{format_report, print_report, Report};
pub use response::{CrawlResponse, PageEntry, ResponseStatus};

use crate::crawler::CrawlOutcome;
use crate::SkimError;

/// Serializes an outcome as pretty-printed JSON
pub fn to_json(outcome: &CrawlOutcome) -> Result<String, SkimError> {
    let response = CrawlResponse::from(outcome);
    Ok(serde_json::to_string_pretty(&response)?)
}
