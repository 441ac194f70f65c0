//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Seeding and draining the frontier
//! - robots.txt authorization and per-origin delays
//! - Fetching pages and discovering links
//! - Scope filtering of discovered links and redirect targets
//! - Observing cancellation
//!
//! The loop is sequential: exactly one page request is in flight at a time,
//! and every piece of run state is owned by the [`Coordinator`].

use crate::config::CrawlConfig;
use crate::crawler::frontier::{CrawlTask, Frontier};
use crate::crawler::politeness::{Authorization, PolitenessGate};
use crate::crawler::report::{CrawlReport, CrawlStats, PageResult};
use crate::crawler::{
    build_http_client, discover_links, FetchError, FetchResponse, Fetcher, MAX_REDIRECTS,
};
use crate::state::{CrawlStatus, TaskOutcome};
use crate::url::origin_of;
use crate::CrawlError;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// What the loop should do after one task
enum Step {
    Continue,
    Cancelled,
}

/// Main crawler coordinator structure
///
/// Created in the `Idle` state with the seed already in the frontier.
/// [`Coordinator::run`] drives it to `Completed` or `Aborted`.
pub struct Coordinator {
    config: CrawlConfig,
    frontier: Frontier,
    gate: PolitenessGate,
    fetcher: Fetcher,
    status: CrawlStatus,
    pages: Vec<PageResult>,
    stats: CrawlStats,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - Validated run settings
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run, seed enqueued at depth 0
    /// * `Err(CrawlError)` - The HTTP client could not be built
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        let client = build_http_client(&config.user_agent, config.request_timeout)?;

        let fetcher = Fetcher::new(client.clone(), config.request_timeout, config.html_only);
        let gate = PolitenessGate::new(
            client,
            config.respect_robots,
            config.delay,
            config.robots_agent.clone(),
            config.request_timeout,
        );

        let mut frontier = Frontier::new(config.max_depth);
        frontier.push(CrawlTask::new(config.seed.clone(), 0));

        Ok(Self {
            config,
            frontier,
            gate,
            fetcher,
            status: CrawlStatus::Idle,
            pages: Vec::new(),
            stats: CrawlStats::default(),
        })
    }

    /// Current run status
    pub fn status(&self) -> CrawlStatus {
        self.status
    }

    /// The settings this coordinator runs with
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Number of tasks waiting in the frontier
    pub fn pending(&self) -> usize {
        self.frontier.len()
    }

    /// Runs the main crawl loop to completion or cancellation
    ///
    /// Each iteration:
    /// 1. Stops with `Aborted` if `cancel` has fired
    /// 2. Stops with `Completed` once `max_pages` pages are recorded
    /// 3. Pops the next task, or stops with `Completed` when none remain
    /// 4. Asks the politeness gate for permission (robots.txt)
    /// 5. Waits out the per-origin delay and fetches the page
    /// 6. Records the page and enqueues its in-scope links
    ///
    /// Per-page failures are logged and skipped; the run itself never fails.
    pub async fn run(mut self, cancel: CancellationToken) -> CrawlReport {
        let started_at = Utc::now();
        self.transition(CrawlStatus::Running);

        tracing::info!(
            "Starting crawl from {} (max depth {}, max pages {}, delay {:?})",
            self.config.seed,
            self.config.max_depth,
            self.config.max_pages,
            self.config.delay
        );

        let final_status = loop {
            if cancel.is_cancelled() {
                break CrawlStatus::Aborted;
            }

            if self.pages.len() >= self.config.max_pages as usize {
                tracing::info!("Page limit of {} reached", self.config.max_pages);
                break CrawlStatus::Completed;
            }

            let Some(task) = self.frontier.pop() else {
                tracing::info!("Frontier is empty, crawl complete");
                break CrawlStatus::Completed;
            };

            if let Step::Cancelled = self.process_task(task, &cancel).await {
                break CrawlStatus::Aborted;
            }
        };

        if final_status == CrawlStatus::Aborted {
            tracing::warn!(
                "Crawl cancelled with {} pages fetched, dropping {} pending tasks",
                self.pages.len(),
                self.frontier.len()
            );
            self.frontier.clear();
        }

        self.transition(final_status);

        let finished_at = Utc::now();
        tracing::info!(
            "Crawl {}: {} pages fetched, {} disallowed, {} failed in {}ms",
            final_status,
            self.stats.fetched(),
            self.stats.disallowed(),
            self.stats.failed(),
            (finished_at - started_at).num_milliseconds()
        );

        CrawlReport {
            status: final_status,
            pages: self.pages,
            stats: self.stats,
            started_at,
            finished_at,
        }
    }

    /// Processes a single frontier task
    ///
    /// Redirects are followed one hop at a time. Every hop passes the same
    /// scope check, robots.txt authorization and per-origin delay as a
    /// frontier task, under the hop's own origin.
    async fn process_task(&mut self, task: CrawlTask, cancel: &CancellationToken) -> Step {
        let mut target = task.url.clone();
        let mut redirects = 0;

        let page = loop {
            let Some(origin) = origin_of(&target) else {
                tracing::debug!("Skipping {}: no origin", target);
                return Step::Continue;
            };

            match self.gate.authorize(&target, cancel).await {
                Authorization::Allowed => {}
                Authorization::Disallowed => {
                    tracing::info!("Skipped {} (disallowed by robots.txt)", target);
                    self.stats.record(TaskOutcome::Disallowed);
                    return Step::Continue;
                }
                Authorization::Cancelled => return Step::Cancelled,
            }

            if !self.gate.wait_if_needed(&origin, cancel).await {
                return Step::Cancelled;
            }

            self.gate.record_fetch(&origin);
            tracing::debug!("Fetching {} (depth {})", target, task.depth);

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Step::Cancelled,
                result = self.fetcher.fetch(&target) => result,
            };

            match result {
                Ok(FetchResponse::Page(page)) => break page,
                Ok(FetchResponse::Redirect { status, location }) => {
                    redirects += 1;
                    if redirects > MAX_REDIRECTS {
                        self.record_failure(&task.url, FetchError::TooManyRedirects(MAX_REDIRECTS));
                        return Step::Continue;
                    }

                    if let Err(violation) = self.config.scope.check(&location) {
                        tracing::info!(
                            "Skipped {}: redirect to {} is out of scope ({})",
                            task.url,
                            location,
                            violation
                        );
                        self.stats.record(TaskOutcome::RedirectOutOfScope);
                        return Step::Continue;
                    }

                    tracing::debug!("{} redirected ({}) to {}", target, status, location);
                    target = location;
                }
                Err(e) => {
                    self.record_failure(&target, e);
                    return Step::Continue;
                }
            }
        };

        tracing::info!(
            "Fetched {} (depth {}, status {})",
            task.url,
            task.depth,
            page.status
        );
        self.stats.record(TaskOutcome::Fetched);

        if task.depth < self.config.max_depth {
            self.enqueue_links(&page.body, &page.final_url, task.depth + 1);
        }

        self.pages.push(PageResult {
            url: task.url,
            final_url: page.final_url,
            depth: task.depth,
            status: page.status,
            content_type: page.content_type,
            body: page.body,
            fetched_at: Utc::now(),
        });

        Step::Continue
    }

    fn record_failure(&mut self, url: &Url, e: FetchError) {
        match &e {
            FetchError::NotHtml(_) => tracing::info!("Skipped {}: {}", url, e),
            _ => tracing::warn!("Failed to fetch {}: {}", url, e),
        }
        self.stats.record(e.outcome());
    }

    /// Enqueues the in-scope links of a fetched page at `depth`
    fn enqueue_links(&mut self, html: &str, page_url: &Url, depth: u32) {
        let links = discover_links(html, page_url);
        let mut enqueued = 0u64;

        for link in links {
            self.stats.links_discovered += 1;

            if let Err(violation) = self.config.scope.check(&link) {
                tracing::trace!("Out of scope {}: {}", link, violation);
                self.stats.links_out_of_scope += 1;
                continue;
            }

            if self.frontier.push(CrawlTask::new(link, depth)) {
                enqueued += 1;
            }
        }

        self.stats.links_enqueued += enqueued;
        tracing::debug!(
            "Enqueued {} new links from {} ({} pending)",
            enqueued,
            page_url,
            self.frontier.len()
        );
    }

    fn transition(&mut self, next: CrawlStatus) {
        debug_assert!(
            self.status.can_transition_to(next),
            "illegal transition {} -> {}",
            self.status,
            next
        );
        self.status = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinator_creation() {
        let config = CrawlConfig::for_seed("https://example.com/").unwrap();
        let coordinator = Coordinator::new(config).unwrap();

        assert_eq!(coordinator.status(), CrawlStatus::Idle);
        assert_eq!(coordinator.pending(), 1);
        assert_eq!(coordinator.config().seed.as_str(), "https://example.com/");
    }

    #[tokio::test]
    async fn test_cancelled_before_start_is_aborted() {
        let config = CrawlConfig::for_seed("https://example.com/").unwrap();
        let coordinator = Coordinator::new(config).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = coordinator.run(cancel).await;
        assert_eq!(report.status, CrawlStatus::Aborted);
        assert!(report.pages.is_empty());
        assert_eq!(report.stats.tasks(), 0);
    }
}
