//! Configuration module for Skimmer
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a default, so an empty file (or no file at all) is a valid
//! configuration as long as a start URL is supplied some other way.
//!
//! # Example
//!
//! ```no_run
//! use skimmer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("skimmer.toml")).unwrap();
//! println!("Request timeout: {}s", config.fetcher.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, FetcherConfig, UserAgentConfig};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::{parse_ignored_url, validate, validate_start_url};
