//! Linkmend main entry point
//!
//! This is the command-line interface for the Linkmend link checker.

use anyhow::{bail, Context};
use clap::Parser;
use linkmend::checker::{build_http_client, BatchCoordinator};
use linkmend::config::{load_config, validate, Config};
use linkmend::output::print_report;
use linkmend::sitemap::{probe_sitemap, MemorySitemapCache};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Linkmend: broken-link triage with redirect suggestions
///
/// Linkmend checks a list of URLs and, for every URL that is broken, reads
/// the site's sitemap to suggest the live page that most likely replaced it.
#[derive(Parser, Debug)]
#[command(name = "linkmend")]
#[command(version)]
#[command(about = "Find broken links and suggest redirects", long_about = None)]
struct Cli {
    /// URLs to check
    #[arg(value_name = "URLS")]
    urls: Vec<String>,

    /// Read URLs from a file, one per line (blank lines and # comments skipped)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sitemap location: an absolute URL, or a path relative to each site
    #[arg(long, value_name = "URL|PATH")]
    sitemap: Option<String>,

    /// Maximum concurrent checks
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Print results and summary as JSON
    #[arg(long)]
    json: bool,

    /// Test a sitemap location and exit (the first URL, if any, resolves relative paths)
    #[arg(long, value_name = "SITEMAP")]
    probe: Option<String>,

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

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(sitemap) = &cli.sitemap {
        config.checker.sitemap_url = Some(sitemap.clone());
    }
    if let Some(workers) = cli.workers {
        config.checker.max_workers = workers;
    }
    validate(&config).context("invalid settings")?;

    if let Some(sitemap) = &cli.probe {
        return handle_probe(&config, sitemap, cli.urls.first().map(String::as_str)).await;
    }

    let mut urls = cli.urls.clone();
    if let Some(path) = &cli.input {
        urls.extend(read_url_file(path)?);
    }
    if urls.is_empty() {
        bail!("no URLs to check; pass them as arguments or with --input");
    }

    handle_check(&config, &urls, cli.json).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkmend=info,warn"),
            1 => EnvFilter::new("linkmend=debug,info"),
            2 => EnvFilter::new("linkmend=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so --json output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads one URL per line, skipping blanks and `#` comments
fn read_url_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Handles --probe: tests one sitemap location and prints the outcome as JSON
async fn handle_probe(
    config: &Config,
    sitemap: &str,
    sample_url: Option<&str>,
) -> anyhow::Result<()> {
    let client = build_http_client(&config.user_agent)?;
    let timeout = Duration::from_secs(config.checker.sitemap_timeout);

    let probe = probe_sitemap(&client, sitemap, sample_url, timeout).await;
    println!("{}", serde_json::to_string_pretty(&probe)?);

    if !probe.success {
        bail!(
            "sitemap check failed for {}: {}",
            probe.sitemap_url,
            probe.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

/// Handles the main batch check
async fn handle_check(config: &Config, urls: &[String], json: bool) -> anyhow::Result<()> {
    let cache = Arc::new(MemorySitemapCache::new());
    let coordinator = BatchCoordinator::from_config(config, cache)?;

    let report = coordinator
        .check_all(urls, config.checker.max_workers)
        .await
        .context("batch check failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report.results, &report.summary);
    }

    Ok(())
}
