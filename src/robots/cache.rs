//! Per-origin politeness cache entry
//!
//! One [`RobotsDecision`] exists per origin touched by a run. It holds the
//! resolved robots.txt rules and the time of the last page fetch, and lives
//! only as long as the run.

use crate::robots::ParsedRobots;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Cached robots.txt outcome and request spacing for one origin
#[derive(Debug, Clone)]
pub struct RobotsDecision {
    /// The origin (`scheme://host[:port]`) this entry describes
    pub origin: String,

    /// Resolved rules; `None` until robots.txt has been consulted
    rules: Option<ParsedRobots>,

    /// When the rules were resolved
    pub resolved_at: Option<DateTime<Utc>>,

    /// When the last page fetch to this origin started
    pub last_fetch: Option<Instant>,
}

impl RobotsDecision {
    /// Creates an unresolved entry for `origin`
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            rules: None,
            resolved_at: None,
            last_fetch: None,
        }
    }

    /// Returns true once robots.txt has been consulted (or failed open)
    pub fn is_resolved(&self) -> bool {
        self.rules.is_some()
    }

    /// Stores the rules for this origin
    pub fn resolve(&mut self, rules: ParsedRobots) {
        self.rules = Some(rules);
        self.resolved_at = Some(Utc::now());
    }

    /// Checks a URL against the cached rules; unresolved entries allow
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        self.rules
            .as_ref()
            .map_or(true, |rules| rules.is_allowed(url, user_agent))
    }

    /// Gets the crawl delay from the cached rules
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        self.rules.as_ref()?.crawl_delay(user_agent)
    }

    /// Records that a page fetch to this origin started at `now`
    pub fn record_fetch(&mut self, now: Instant) {
        self.last_fetch = Some(now);
    }

    /// Time left before the next fetch may start, or None if it may start now
    pub fn time_until_next_fetch(&self, delay: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_fetch?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < delay {
            Some(delay - elapsed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_unresolved_and_allows() {
        let entry = RobotsDecision::new("https://example.com");
        assert!(!entry.is_resolved());
        assert!(entry.resolved_at.is_none());
        assert!(entry.is_allowed("https://example.com/private/x", "TestBot"));
        assert_eq!(entry.crawl_delay("TestBot"), None);
    }

    #[test]
    fn test_resolve_applies_rules() {
        let mut entry = RobotsDecision::new("https://example.com");
        entry.resolve(ParsedRobots::from_content("User-agent: *\nDisallow: /private/"));

        assert!(entry.is_resolved());
        assert!(entry.resolved_at.is_some());
        assert!(!entry.is_allowed("https://example.com/private/x", "TestBot"));
        assert!(entry.is_allowed("https://example.com/public", "TestBot"));
    }

    #[test]
    fn test_time_until_next_fetch() {
        let mut entry = RobotsDecision::new("https://example.com");
        let delay = Duration::from_millis(1000);
        let now = Instant::now();

        assert!(entry.time_until_next_fetch(delay, now).is_none());

        entry.record_fetch(now);
        assert_eq!(
            entry.time_until_next_fetch(delay, now),
            Some(Duration::from_millis(1000))
        );

        let soon = now + Duration::from_millis(400);
        assert_eq!(
            entry.time_until_next_fetch(delay, soon),
            Some(Duration::from_millis(600))
        );

        let later = now + Duration::from_millis(1100);
        assert!(entry.time_until_next_fetch(delay, later).is_none());
    }

    #[test]
    fn test_zero_delay_never_waits() {
        let mut entry = RobotsDecision::new("https://example.com");
        let now = Instant::now();
        entry.record_fetch(now);
        assert!(entry.time_until_next_fetch(Duration::ZERO, now).is_none());
    }
}
