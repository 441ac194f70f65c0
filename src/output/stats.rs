//! Statistics generation from a crawl report
//!
//! This module provides functionality for summarizing and displaying
//! the counters and pages of a finished run.

use crate::crawler::CrawlReport;
use crate::state::{CrawlStatus, TaskOutcome};
use std::collections::{BTreeMap, BTreeSet};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Terminal status of the run
    pub status: CrawlStatus,

    /// Total number of tasks taken from the frontier
    pub total_tasks: u64,

    /// Count of tasks by outcome
    pub tasks_by_outcome: BTreeMap<TaskOutcome, u64>,

    /// Count of fetched pages by depth
    pub pages_by_depth: BTreeMap<u32, u64>,

    /// Number of distinct hosts pages were fetched from
    pub unique_hosts: u64,

    /// Links found on fetched pages
    pub links_discovered: u64,

    /// Links accepted into the frontier
    pub links_enqueued: u64,

    /// Links rejected by the scope check
    pub links_out_of_scope: u64,

    /// Run duration in milliseconds
    pub duration_ms: i64,
}

impl CrawlStatistics {
    /// Summarizes a finished crawl
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut pages_by_depth = BTreeMap::new();
        let mut hosts = BTreeSet::new();

        for page in &report.pages {
            *pages_by_depth.entry(page.depth).or_insert(0) += 1;
            if let Some(host) = page.url.host_str() {
                hosts.insert(host.to_string());
            }
        }

        Self {
            status: report.status,
            total_tasks: report.stats.tasks(),
            tasks_by_outcome: report.stats.outcomes.clone(),
            pages_by_depth,
            unique_hosts: hosts.len() as u64,
            links_discovered: report.stats.links_discovered,
            links_enqueued: report.stats.links_enqueued,
            links_out_of_scope: report.stats.links_out_of_scope,
            duration_ms: report.duration().num_milliseconds(),
        }
    }

    /// Number of tasks whose outcome satisfies `category`
    pub fn tasks_where(&self, category: impl Fn(&TaskOutcome) -> bool) -> u64 {
        self.tasks_by_outcome
            .iter()
            .filter(|(outcome, _)| category(*outcome))
            .map(|(_, count)| count)
            .sum()
    }

    /// Share of tasks that produced a page, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        let fetched = self.tasks_where(TaskOutcome::is_success);
        (fetched as f64 / self.total_tasks as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Status: {}", stats.status);
    println!("  Tasks processed: {}", stats.total_tasks);
    println!(
        "  Fetched / skipped / failed: {} / {} / {}",
        stats.tasks_where(TaskOutcome::is_success),
        stats.tasks_where(TaskOutcome::is_skipped),
        stats.tasks_where(TaskOutcome::is_failure)
    );
    println!("  Unique hosts: {}", stats.unique_hosts);
    println!("  Duration: {:.1}s", stats.duration_ms as f64 / 1000.0);
    println!();

    println!("Tasks by Outcome:");
    // Sort outcomes by count (descending)
    let mut outcome_counts: Vec<_> = stats.tasks_by_outcome.iter().collect();
    outcome_counts.sort_by(|a, b| b.1.cmp(a.1));

    for (outcome, count) in outcome_counts {
        let percentage = if stats.total_tasks > 0 {
            (*count as f64 / stats.total_tasks as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", outcome, count, percentage);
    }
    println!();

    if !stats.pages_by_depth.is_empty() {
        println!("Pages by Depth:");
        for (depth, count) in &stats.pages_by_depth {
            println!("  {}: {}", depth, count);
        }
        println!();
    }

    println!("Links:");
    println!("  Discovered: {}", stats.links_discovered);
    println!("  Enqueued: {}", stats.links_enqueued);
    println!("  Out of scope: {}", stats.links_out_of_scope);
    println!();

    println!("Success Rate: {:.1}%", stats.success_rate());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::{CrawlStats, PageResult};
    use chrono::{Duration, Utc};
    use url::Url;

    fn page(url: &str, depth: u32) -> PageResult {
        let url = Url::parse(url).unwrap();
        PageResult {
            url: url.clone(),
            final_url: url,
            depth,
            status: 200,
            content_type: "text/html".to_string(),
            body: String::new(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_statistics_from_report() {
        let mut stats = CrawlStats::default();
        stats.record(TaskOutcome::Fetched);
        stats.record(TaskOutcome::Fetched);
        stats.record(TaskOutcome::Fetched);
        stats.record(TaskOutcome::HttpError);
        stats.links_discovered = 12;
        stats.links_enqueued = 4;
        stats.links_out_of_scope = 3;

        let started_at = Utc::now();
        let report = CrawlReport {
            status: CrawlStatus::Completed,
            pages: vec![
                page("https://example.com/", 0),
                page("https://example.com/a", 1),
                page("https://blog.example.com/b", 1),
            ],
            stats,
            started_at,
            finished_at: started_at + Duration::milliseconds(1500),
        };

        let statistics = CrawlStatistics::from_report(&report);
        assert_eq!(statistics.total_tasks, 4);
        assert_eq!(statistics.unique_hosts, 2);
        assert_eq!(statistics.pages_by_depth.get(&0), Some(&1));
        assert_eq!(statistics.pages_by_depth.get(&1), Some(&2));
        assert_eq!(statistics.links_out_of_scope, 3);
        assert_eq!(statistics.duration_ms, 1500);
        assert!((statistics.success_rate() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tasks_by_category() {
        let mut stats = CrawlStats::default();
        stats.record(TaskOutcome::Fetched);
        stats.record(TaskOutcome::Disallowed);
        stats.record(TaskOutcome::RedirectOutOfScope);
        stats.record(TaskOutcome::NotHtml);
        stats.record(TaskOutcome::Timeout);
        stats.record(TaskOutcome::Timeout);

        let now = Utc::now();
        let report = CrawlReport {
            status: CrawlStatus::Completed,
            pages: vec![page("https://example.com/", 0)],
            stats,
            started_at: now,
            finished_at: now,
        };

        let statistics = CrawlStatistics::from_report(&report);
        assert_eq!(statistics.tasks_where(TaskOutcome::is_success), 1);
        assert_eq!(statistics.tasks_where(TaskOutcome::is_skipped), 2);
        assert_eq!(statistics.tasks_where(TaskOutcome::is_failure), 3);
    }

    #[test]
    fn test_success_rate_empty() {
        let now = Utc::now();
        let report = CrawlReport {
            status: CrawlStatus::Aborted,
            pages: vec![],
            stats: CrawlStats::default(),
            started_at: now,
            finished_at: now,
        };
        assert_eq!(CrawlStatistics::from_report(&report).success_rate(), 0.0);
    }
}
