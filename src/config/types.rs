use serde::Deserialize;

/// File extensions that never lead to crawlable HTML pages
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".zip", ".rar", ".tar", ".gz",
    ".mp3", ".mp4", ".avi", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".ico", ".css", ".js",
    ".xml", ".json",
];

/// Main configuration structure for Webtrawl, as read from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Absolute http(s) URL the crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum link depth from the seed (the seed itself is depth 0)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of successfully fetched pages
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Minimum time between requests to the same origin (seconds)
    #[serde(rename = "delay-seconds", default = "default_delay_seconds")]
    pub delay_seconds: f64,

    /// Whether robots.txt rules are honored
    #[serde(rename = "respect-robots", default = "default_true")]
    pub respect_robots: bool,

    /// Per-request timeout (seconds)
    #[serde(
        rename = "request-timeout-seconds",
        default = "default_request_timeout_seconds"
    )]
    pub request_timeout_seconds: f64,

    /// Skip responses whose Content-Type is not HTML
    #[serde(rename = "html-only", default = "default_true")]
    pub html_only: bool,
}

/// Which discovered links are eligible for fetching
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    /// Domain patterns ("example.com" or "*.example.com"); empty means the seed host only
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: Vec<String>,

    /// Follow links to any host
    #[serde(rename = "allow-external", default)]
    pub allow_external: bool,

    /// Path suffixes that are never fetched
    #[serde(
        rename = "excluded-extensions",
        default = "default_excluded_extensions"
    )]
    pub excluded_extensions: Vec<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            allowed_domains: Vec::new(),
            allow_external: false,
            excluded_extensions: default_excluded_extensions(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "webtrawl".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/bot".to_string(),
            contact_email: "bot@example.com".to_string(),
        }
    }
}

impl CrawlerConfig {
    /// Creates a crawler section with defaults for everything but the seed
    pub fn with_seed(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            delay_seconds: default_delay_seconds(),
            respect_robots: true,
            request_timeout_seconds: default_request_timeout_seconds(),
            html_only: true,
        }
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_pages() -> u32 {
    10
}

fn default_delay_seconds() -> f64 {
    1.0
}

fn default_request_timeout_seconds() -> f64 {
    10.0
}

fn default_true() -> bool {
    true
}

fn default_excluded_extensions() -> Vec<String> {
    DEFAULT_EXCLUDED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}
