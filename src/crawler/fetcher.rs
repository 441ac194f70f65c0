//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building the HTTP client with the crawler's user agent string
//! - Single-attempt GET requests with a timeout
//! - Error classification into [`FetchError`]
//!
//! There is no retry at this layer; a failed URL stays failed for the run.
//! Redirects are not followed here. A 3xx comes back as
//! [`FetchResponse::Redirect`] so the caller can vet each hop.

use crate::state::TaskOutcome;
use crate::url::normalize_parsed;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
/// Longest redirect chain followed for one task
pub const MAX_REDIRECTS: usize = 10;
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the body was served from
    pub final_url: Url,
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value (empty if absent)
    pub content_type: String,
    /// Decoded response body
    pub body: String,
}

/// What a single request produced
#[derive(Debug, Clone)]
pub enum FetchResponse {
    /// 2xx response with an accepted body
    Page(FetchedPage),

    /// 301, 302, 303, 307 or 308 with a usable `Location`
    Redirect {
        status: u16,
        /// Resolved against the request URL and normalized
        location: Url,
    },
}

/// Classified failure of a single fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("not HTML (content-type: {0})")]
    NotHtml(String),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("invalid redirect: {0}")]
    BadRedirect(String),

    #[error("more than {0} redirects")]
    TooManyRedirects(usize),
}

impl FetchError {
    /// Maps the failure to the task outcome recorded in crawl statistics
    pub fn outcome(&self) -> TaskOutcome {
        match self {
            Self::Timeout => TaskOutcome::Timeout,
            Self::Connect(_)
            | Self::Network(_)
            | Self::Body(_)
            | Self::BadRedirect(_)
            | Self::TooManyRedirects(_) => TaskOutcome::NetworkError,
            Self::Status(_) => TaskOutcome::HttpError,
            Self::NotHtml(_) => TaskOutcome::NotHtml,
        }
    }

    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The full User-Agent header value
/// * `timeout` - Whole-request timeout
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use webtrawl::crawler::build_http_client;
///
/// let client = build_http_client("webtrawl/0.1 (+https://example.com/bot)", Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

    Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true if a Content-Type value denotes an HTML document
///
/// A missing header is given the benefit of the doubt.
pub fn is_html_content_type(content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    content_type.is_empty()
        || content_type.starts_with("text/html")
        || content_type.starts_with("application/xhtml+xml")
}

/// Performs page fetches for one crawl run
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    timeout: Duration,
    html_only: bool,
}

impl Fetcher {
    /// Creates a fetcher around an already-built client
    pub fn new(client: Client, timeout: Duration, html_only: bool) -> Self {
        Self {
            client,
            timeout,
            html_only,
        }
    }

    /// Fetches a URL with a single GET request
    ///
    /// # Error classification
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Timeout (connect, headers or body) | `Timeout` |
    /// | Connection refused / DNS / TLS | `Connect` |
    /// | Other transport errors | `Network` |
    /// | Redirect without a usable `Location` | `BadRedirect` |
    /// | Any other non-2xx status | `Status` |
    /// | Non-HTML Content-Type (html-only) | `NotHtml` |
    /// | Body could not be decoded | `Body` |
    pub async fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if is_redirect_status(status.as_u16()) {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| FetchError::BadRedirect(format!("HTTP {} without Location", status)))?;
            let location = url
                .join(location)
                .map_err(|e| FetchError::BadRedirect(format!("'{}': {}", location, e)))
                .and_then(|u| {
                    normalize_parsed(u).map_err(|e| FetchError::BadRedirect(e.to_string()))
                })?;

            return Ok(FetchResponse::Redirect {
                status: status.as_u16(),
                location,
            });
        }

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if self.html_only && !is_html_content_type(&content_type) {
            return Err(FetchError::NotHtml(content_type));
        }

        let final_url = response.url().clone();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Body(e.to_string())
            }
        })?;

        Ok(FetchResponse::Page(FetchedPage {
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        }))
    }
}

fn is_redirect_status(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}
