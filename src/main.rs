//! Skimmer main entry point
//!
//! This is the command-line interface for the Skimmer depth-one crawler.

use anyhow::Context;
use clap::Parser;
use skimmer::config::{load_config, validate, Config};
use skimmer::crawler::{Coordinator, CrawlRequest};
use skimmer::output::{print_report, to_json};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Skimmer: a depth-one, domain-scoped crawler
///
/// Without --target-id, prints the visible text of the start page. With
/// --target-id, fetches every same-domain https link on the start page and
/// reports the pages that returned HTML.
#[derive(Parser, Debug)]
#[command(name = "skimmer")]
#[command(version)]
#[command(about = "A depth-one, domain-scoped crawler", long_about = None)]
struct Cli {
    /// Start page URL (overrides crawl.start-url from the config file)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Element identifier; its presence switches to link-crawl mode
    #[arg(long, value_name = "ID")]
    target_id: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of linked pages to fetch (0 = unlimited)
    #[arg(long, value_name = "N")]
    max_links: Option<usize>,

    /// Only fetch links containing one of these substrings (comma separated)
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',')]
    url_patterns: Vec<String>,

    /// Only keep linked pages whose HTML contains one of these (comma separated)
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',')]
    content_patterns: Vec<String>,

    /// Absolute URLs that are never fetched (comma separated)
    #[arg(long, value_name = "URLS", value_delimiter = ',')]
    ignored_urls: Vec<String>,

    /// Number of linked pages fetched at the same time
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Print the result as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let request = CrawlRequest::from_config(&config.crawl, config.fetcher.https_only)
        .context("No usable start URL; pass one on the command line or set crawl.start-url")?;

    tracing::info!(
        "Crawling {} in {} mode",
        request.start_url,
        request.mode().as_str()
    );

    let coordinator =
        Coordinator::from_config(&config).context("Failed to build the HTTP client")?;
    let outcome = coordinator
        .crawl(&request)
        .await
        .with_context(|| format!("Crawl of {} failed", request.start_url))?;

    if cli.json {
        println!("{}", to_json(&outcome)?);
    } else {
        print_report(&outcome);
    }

    if outcome.is_failed() {
        std::process::exit(1);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// With no flags, `RUST_LOG` wins over the default filter.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("skimmer=info,warn")),
            1 => EnvFilter::new("skimmer=debug,info"),
            2 => EnvFilter::new("skimmer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file (if any) and layers command line overrides on top
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.crawl.start_url = Some(url.clone());
    }
    if let Some(target_id) = &cli.target_id {
        config.crawl.target_id = Some(target_id.clone());
    }
    if let Some(max_links) = cli.max_links {
        config.crawl.max_links = max_links;
    }
    if !cli.url_patterns.is_empty() {
        config.crawl.url_patterns = cli.url_patterns.clone();
    }
    if !cli.content_patterns.is_empty() {
        config.crawl.content_patterns = cli.content_patterns.clone();
    }
    if !cli.ignored_urls.is_empty() {
        config.crawl.ignored_urls = cli.ignored_urls.clone();
    }
    if let Some(concurrency) = cli.concurrency {
        config.fetcher.max_concurrent_fetches = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.fetcher.timeout_secs = timeout;
    }

    validate(&config).context("Invalid configuration")?;

    Ok(config)
}
