//! Webtrawl main entry point
//!
//! This is the command-line interface for the Webtrawl crawler.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use webtrawl::config::{load_config_with_hash, Config, CrawlerConfig, ScopeConfig, UserAgentConfig};
use webtrawl::crawler::crawl;
use webtrawl::extract::Extractor;
use webtrawl::output::{print_pages, print_statistics, summarize_pages, CrawlStatistics};
use webtrawl::CrawlConfig;

/// Webtrawl: a polite single-site web crawler
///
/// Webtrawl crawls a website breadth-first from a seed URL while respecting
/// robots.txt, per-host request delays, and depth and page limits.
#[derive(Parser, Debug)]
#[command(name = "webtrawl")]
#[command(version)]
#[command(about = "A polite single-site web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed URL (overrides the config file)
    #[arg(long)]
    seed: Option<String>,

    /// Maximum link depth from the seed
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum number of pages to fetch
    #[arg(long)]
    max_pages: Option<u32>,

    /// Delay between requests to the same host, in seconds
    #[arg(long)]
    delay: Option<f64>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<f64>,

    /// Ignore robots.txt
    #[arg(long)]
    no_robots: bool,

    /// Follow links to other hosts
    #[arg(long)]
    allow_external: bool,

    /// Validate config and show what would be crawled without actually crawling
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
    let crawl_config = CrawlConfig::from_config(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&crawl_config);
        return Ok(());
    }

    handle_crawl(crawl_config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webtrawl=info,warn"),
            1 => EnvFilter::new("webtrawl=debug,info"),
            2 => EnvFilter::new("webtrawl=trace,debug"),
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

/// Loads the config file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            let Some(seed) = &cli.seed else {
                bail!("Either a config file or --seed must be given");
            };
            Config {
                crawler: CrawlerConfig::with_seed(seed.clone()),
                scope: ScopeConfig::default(),
                user_agent: UserAgentConfig::default(),
            }
        }
    };

    let crawler = &mut config.crawler;
    if let Some(seed) = &cli.seed {
        crawler.seed_url = seed.clone();
    }
    if let Some(max_depth) = cli.max_depth {
        crawler.max_depth = max_depth;
    }
    if let Some(max_pages) = cli.max_pages {
        crawler.max_pages = max_pages;
    }
    if let Some(delay) = cli.delay {
        crawler.delay_seconds = delay;
    }
    if let Some(timeout) = cli.timeout {
        crawler.request_timeout_seconds = timeout;
    }
    if cli.no_robots {
        crawler.respect_robots = false;
    }
    if cli.allow_external {
        config.scope.allow_external = true;
    }

    Ok(config)
}

/// Handles the --dry-run mode: shows the resolved settings
fn handle_dry_run(config: &CrawlConfig) {
    println!("=== Webtrawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Max depth: {}", config.max_depth);
    println!("  Max pages: {}", config.max_pages);
    println!("  Delay: {:.2}s", config.delay.as_secs_f64());
    println!("  Request timeout: {:.2}s", config.request_timeout.as_secs_f64());
    println!("  Respect robots.txt: {}", config.respect_robots);
    println!("  HTML only: {}", config.html_only);

    println!("\nScope:");
    if config.scope.allows_external() {
        println!("  Any host");
    } else {
        for domain in config.scope.allowed_domains() {
            println!("  - {}", domain);
        }
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent);

    println!("\nConfiguration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: CrawlConfig) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping crawl");
            on_interrupt.cancel();
        }
    });

    let report = crawl(config, cancel).await.context("Crawl failed to start")?;

    let pages = summarize_pages(&report, &Extractor::default());
    print_pages(&pages);
    print_statistics(&CrawlStatistics::from_report(&report));

    if report.is_aborted() {
        println!("\nCrawl was interrupted; the results above are partial");
    }

    Ok(())
}
