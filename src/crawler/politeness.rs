//! Per-origin politeness: robots.txt authorization and request spacing
//!
//! The gate keeps one [`RobotsDecision`] per origin for the lifetime of a
//! run. robots.txt is fetched lazily the first time an origin is seen, and
//! any failure to obtain usable rules is cached as allow-all.

use crate::robots::{fetch_robots, ParsedRobots, RobotsDecision};
use crate::url::origin_of;
use reqwest::Client;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Result of asking the gate whether a URL may be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Disallowed,
    /// The run was cancelled while robots.txt was being fetched
    Cancelled,
}

/// robots.txt cache and per-origin rate limiter for one crawl run
#[derive(Debug)]
pub struct PolitenessGate {
    client: Client,
    decisions: HashMap<String, RobotsDecision>,
    respect_robots: bool,
    delay: Duration,
    robots_agent: String,
    timeout: Duration,
}

impl PolitenessGate {
    /// Creates a gate
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for robots.txt requests
    /// * `respect_robots` - Whether robots.txt is consulted at all
    /// * `delay` - Configured minimum spacing between fetches to one origin
    /// * `robots_agent` - Product token matched against `User-agent` groups
    /// * `timeout` - robots.txt request timeout
    pub fn new(
        client: Client,
        respect_robots: bool,
        delay: Duration,
        robots_agent: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            decisions: HashMap::new(),
            respect_robots,
            delay,
            robots_agent: robots_agent.into(),
            timeout,
        }
    }

    /// Decides whether `url` may be fetched
    ///
    /// Fetches robots.txt for the URL's origin on first contact. The fetch
    /// is raced against `cancel`; a cancelled fetch leaves the origin
    /// unresolved.
    pub async fn authorize(&mut self, url: &Url, cancel: &CancellationToken) -> Authorization {
        if !self.respect_robots {
            return Authorization::Allowed;
        }

        let Some(origin) = origin_of(url) else {
            return Authorization::Allowed;
        };

        let resolved = self
            .decisions
            .get(&origin)
            .map_or(false, RobotsDecision::is_resolved);

        if !resolved {
            let rules = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Authorization::Cancelled,
                result = fetch_robots(&self.client, &origin, self.timeout) => result,
            };

            let rules = match rules {
                Ok(rules) => {
                    tracing::debug!("Loaded robots.txt for {}", origin);
                    rules
                }
                Err(e) => {
                    tracing::warn!("{} for {}, allowing all", e, origin);
                    ParsedRobots::allow_all()
                }
            };

            self.entry(&origin).resolve(rules);
        }

        let allowed = self
            .decisions
            .get(&origin)
            .map_or(true, |d| d.is_allowed(url.as_str(), &self.robots_agent));

        if allowed {
            Authorization::Allowed
        } else {
            Authorization::Disallowed
        }
    }

    /// Minimum spacing between fetches to `origin`
    ///
    /// When robots.txt is respected, a longer Crawl-delay wins over the
    /// configured delay.
    pub fn effective_delay(&self, origin: &str) -> Duration {
        if !self.respect_robots {
            return self.delay;
        }

        let crawl_delay = self
            .decisions
            .get(origin)
            .and_then(|d| d.crawl_delay(&self.robots_agent))
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok());

        match crawl_delay {
            Some(robots_delay) => self.delay.max(robots_delay),
            None => self.delay,
        }
    }

    /// Sleeps until the effective delay has passed since the last fetch
    ///
    /// # Returns
    ///
    /// * `true` - The origin may be fetched now
    /// * `false` - The wait was cancelled
    pub async fn wait_if_needed(&self, origin: &str, cancel: &CancellationToken) -> bool {
        let delay = self.effective_delay(origin);
        let remaining = self
            .decisions
            .get(origin)
            .and_then(|d| d.time_until_next_fetch(delay, Instant::now()));

        let Some(remaining) = remaining else {
            return !cancel.is_cancelled();
        };

        tracing::trace!("Waiting {:?} before next request to {}", remaining, origin);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(remaining) => true,
        }
    }

    /// Stamps `origin` with the start time of a page fetch
    pub fn record_fetch(&mut self, origin: &str) {
        self.entry(origin).record_fetch(Instant::now());
    }

    /// Number of origins the gate has seen
    pub fn origin_count(&self) -> usize {
        self.decisions.len()
    }

    fn entry(&mut self, origin: &str) -> &mut RobotsDecision {
        self.decisions
            .entry(origin.to_string())
            .or_insert_with(|| RobotsDecision::new(origin))
    }
}
