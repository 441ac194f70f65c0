use std::fmt;

/// How a single frontier task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskOutcome {
    /// Page fetched and recorded as a result
    Fetched,

    /// robots.txt disallows the URL for our user agent
    Disallowed,

    /// A redirect pointed outside the crawl scope
    RedirectOutOfScope,

    /// Response was not HTML and html-only is enabled
    NotHtml,

    /// Non-2xx status code
    HttpError,

    /// Request timed out
    Timeout,

    /// Connection, DNS, TLS or body read failure
    NetworkError,
}

impl TaskOutcome {
    /// Returns true if this task produced a page result
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Fetched)
    }

    /// Returns true if the task was skipped without requesting its final target
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Disallowed | Self::RedirectOutOfScope)
    }

    /// Returns true if the page request was made but did not yield a result
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::NotHtml | Self::HttpError | Self::Timeout | Self::NetworkError
        )
    }

    /// Returns a short snake_case label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetched => "fetched",
            Self::Disallowed => "disallowed",
            Self::RedirectOutOfScope => "redirect_out_of_scope",
            Self::NotHtml => "not_html",
            Self::HttpError => "http_error",
            Self::Timeout => "timeout",
            Self::NetworkError => "network_error",
        }
    }

    /// Returns all possible outcomes
    pub fn all() -> [Self; 7] {
        [
            Self::Fetched,
            Self::Disallowed,
            Self::RedirectOutOfScope,
            Self::NotHtml,
            Self::HttpError,
            Self::Timeout,
            Self::NetworkError,
        ]
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
