//! Seo-Ripple main entry point
//!
//! This is the command-line interface for the Seo-Ripple site crawler.

use anyhow::{bail, Context};
use clap::Parser;
use seo_ripple::config::{load_config_with_hash, validate, CrawlConfig};
use seo_ripple::crawler::CrawlSession;
use seo_ripple::output::{print_statistics, CrawlStatistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Seo-Ripple: a polite SEO site crawler
///
/// Seo-Ripple crawls a website breadth-first from a base URL while
/// respecting robots.txt, host scope and a request rate limit, and exports
/// the title, description, h1, canonical and robots meta of every page.
#[derive(Parser, Debug)]
#[command(name = "seo-ripple")]
#[command(version)]
#[command(about = "A polite SEO site crawler", long_about = None)]
struct Cli {
    /// Base URL to crawl; overrides `base-url` from the config file
    #[arg(value_name = "BASE_URL")]
    base_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link depth from the base URL
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Maximum number of pages to fetch
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Also crawl subdomains of the base host
    #[arg(long)]
    include_subdomains: bool,

    /// Minimum seconds between requests
    #[arg(long, value_name = "SECS")]
    rate_limit: Option<f64>,

    /// Write an autosave snapshot every N pages
    #[arg(long, value_name = "N")]
    autosave_interval: Option<usize>,

    /// Basename for the exported files
    #[arg(short, long, value_name = "BASENAME")]
    output: Option<String>,

    /// Validate the configuration and show what would be crawled
    #[arg(long)]
    dry_run: bool,

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

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_crawl(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_ripple=info,warn"),
            1 => EnvFilter::new("seo_ripple=debug,info"),
            2 => EnvFilter::new("seo_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<CrawlConfig> {
    let mut config = match (&cli.config, &cli.base_url) {
        (Some(path), _) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        (None, Some(base_url)) => CrawlConfig::new(base_url.clone()),
        (None, None) => bail!("a BASE_URL or --config FILE is required"),
    };

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if cli.include_subdomains {
        config.crawler.include_subdomains = true;
    }
    if let Some(rate_limit) = cli.rate_limit {
        config.crawler.rate_limit_seconds = rate_limit;
    }
    if let Some(interval) = cli.autosave_interval {
        config.crawler.autosave_interval = interval;
    }
    if let Some(basename) = &cli.output {
        config.output.basename = basename.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &CrawlConfig) -> anyhow::Result<()> {
    println!("=== Seo-Ripple Dry Run ===\n");

    println!("Base URL: {}", config.base_url);

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Include subdomains: {}", config.crawler.include_subdomains);
    println!("  Rate limit: {}s", config.crawler.rate_limit_seconds);
    println!("  Autosave every: {} pages", config.crawler.autosave_interval);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Results: {}.{{csv,xlsx,json}}", config.output.export_base().display());
    println!("  Autosave: {}.{{csv,xlsx}}", config.output.autosave_base().display());

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main crawl operation
///
/// Ctrl-C stops the crawl before its next fetch; the partial results are
/// still exported.
async fn handle_crawl(config: CrawlConfig) -> anyhow::Result<()> {
    let mut session = CrawlSession::new(config)?.with_progress(|crawled, max| {
        tracing::info!("Progress: {}/{}", crawled, max);
    });

    let token = session.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            token.cancel();
        }
    });

    session.crawl().await?;

    let written = session.export_default().context("Failed to export results")?;
    for path in &written {
        tracing::info!("Wrote {}", path.display());
    }

    print_statistics(&CrawlStatistics::from_store(&session.snapshot()));

    let stats = session.stats();
    println!(
        "\nCrawled {} pages ({} errors); {} skipped by policy, {} left in frontier",
        stats.pages_crawled, stats.errors, stats.skipped_by_policy, stats.frontier_len
    );

    Ok(())
}
