//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The breadth-first frontier and visited-set
//! - robots.txt authorization and per-origin request spacing
//! - HTTP fetching and HTML link discovery
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod politeness;
mod report;

pub use coordinator::Coordinator;
pub use fetcher::{
    build_http_client, is_html_content_type, FetchError, FetchResponse, FetchedPage, Fetcher,
    MAX_REDIRECTS,
};
pub use frontier::{CrawlTask, Frontier};
pub use parser::discover_links;
pub use politeness::{Authorization, PolitenessGate};
pub use report::{CrawlReport, CrawlStats, PageResult};

use crate::config::CrawlConfig;
use crate::CrawlError;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Seed the frontier
/// 3. Authorize, fetch and parse pages breadth-first
/// 4. Follow in-scope links until a limit is hit, the frontier drains, or
///    `cancel` fires
///
/// # Arguments
///
/// * `config` - Validated run settings
/// * `cancel` - Token that aborts the run; pages fetched so far are kept
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The run finished (completed or aborted)
/// * `Err(CrawlError)` - The crawl could not be started
///
/// # Example
///
/// ```no_run
/// use tokio_util::sync::CancellationToken;
/// use webtrawl::{crawl, CrawlConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CrawlConfig::for_seed("https://example.com/")?;
/// let report = crawl(config, CancellationToken::new()).await?;
/// println!("{} pages, status {}", report.pages.len(), report.status);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    config: CrawlConfig,
    cancel: CancellationToken,
) -> Result<CrawlReport, CrawlError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run(cancel).await)
}
