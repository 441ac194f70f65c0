//! Robots.txt handling module
//!
//! This module provides fetching, parsing, and per-origin caching of
//! robots.txt files. Every failure here fails open: the crawl treats the
//! origin as allow-all and carries on.

mod cache;
mod parser;

pub use cache::RobotsDecision;
pub use parser::ParsedRobots;

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Reasons robots.txt could not be used for an origin
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("robots.txt request failed: {0}")]
    Fetch(String),

    #[error("robots.txt request returned HTTP {0}")]
    Status(u16),

    #[error("robots.txt is malformed: {0}")]
    Malformed(String),
}

/// Builds the robots.txt URL for an origin (`scheme://host[:port]`)
pub fn robots_url(origin: &str) -> String {
    format!("{}/robots.txt", origin.trim_end_matches('/'))
}

/// Fetches and parses robots.txt for an origin
///
/// A 4xx response means the site has no robots.txt and yields allow-all.
/// Network failures, 5xx responses and unparseable bodies are errors the
/// caller is expected to fail open on.
///
/// # Arguments
///
/// * `client` - The HTTP client (already carrying the crawler's User-Agent)
/// * `origin` - The origin to fetch robots.txt from
/// * `timeout` - Request timeout
pub async fn fetch_robots(
    client: &Client,
    origin: &str,
    timeout: Duration,
) -> Result<ParsedRobots, RobotsError> {
    let url = robots_url(origin);

    let response = client
        .get(&url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| RobotsError::Fetch(e.to_string()))?;

    let status = response.status();
    if status.is_client_error() {
        tracing::debug!("No robots.txt at {} (HTTP {})", url, status.as_u16());
        return Ok(ParsedRobots::allow_all());
    }
    if !status.is_success() {
        return Err(RobotsError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| RobotsError::Fetch(e.to_string()))?;

    ParsedRobots::parse(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_url() {
        assert_eq!(
            robots_url("https://example.com"),
            "https://example.com/robots.txt"
        );
        assert_eq!(
            robots_url("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080/robots.txt"
        );
    }
}
