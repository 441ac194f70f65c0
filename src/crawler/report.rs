//! Crawl results handed back to the caller

use crate::state::{CrawlStatus, TaskOutcome};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use url::Url;

/// A successfully fetched page, recorded in fetch order
#[derive(Debug, Clone)]
pub struct PageResult {
    /// The normalized URL that was requested
    pub url: Url,

    /// Where the request ended up after redirects
    pub final_url: Url,

    /// Link distance from the seed
    pub depth: u32,

    /// HTTP status code
    pub status: u16,

    /// Content-Type header value
    pub content_type: String,

    /// Decoded response body
    pub body: String,

    /// When the response was received
    pub fetched_at: DateTime<Utc>,
}

/// Counters collected over one crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Number of tasks per outcome
    pub outcomes: BTreeMap<TaskOutcome, u64>,

    /// Links found on fetched pages (after normalization and dedupe per page)
    pub links_discovered: u64,

    /// Links accepted into the frontier
    pub links_enqueued: u64,

    /// Links dropped by the scope check
    pub links_out_of_scope: u64,
}

impl CrawlStats {
    /// Counts one finished task
    pub fn record(&mut self, outcome: TaskOutcome) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
    }

    /// Number of tasks that ended with `outcome`
    pub fn count(&self, outcome: TaskOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    pub fn fetched(&self) -> u64 {
        self.count(TaskOutcome::Fetched)
    }

    pub fn disallowed(&self) -> u64 {
        self.count(TaskOutcome::Disallowed)
    }

    pub fn not_html(&self) -> u64 {
        self.count(TaskOutcome::NotHtml)
    }

    /// HTTP errors, timeouts and network errors
    pub fn failed(&self) -> u64 {
        self.count(TaskOutcome::HttpError)
            + self.count(TaskOutcome::Timeout)
            + self.count(TaskOutcome::NetworkError)
    }

    /// Total number of tasks taken from the frontier
    pub fn tasks(&self) -> u64 {
        self.outcomes.values().sum()
    }
}

/// The outcome of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Terminal status: `Completed` or `Aborted`
    pub status: CrawlStatus,

    /// Fetched pages in fetch order
    pub pages: Vec<PageResult>,

    pub stats: CrawlStats,

    pub started_at: DateTime<Utc>,

    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Returns true if the run was cut short by cancellation
    pub fn is_aborted(&self) -> bool {
        self.status == CrawlStatus::Aborted
    }

    /// Wall-clock duration of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
