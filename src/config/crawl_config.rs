use crate::config::types::{Config, CrawlerConfig, ScopeConfig, UserAgentConfig};
use crate::config::validation::validate;
use crate::url::{normalize_url, Scope};
use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Immutable, validated settings for one crawl run
///
/// Built from a [`Config`] before any network activity; a crawl never starts
/// with settings that failed validation.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Normalized seed URL (depth 0)
    pub seed: Url,

    /// Domain restriction and resource filtering for discovered links
    pub scope: Scope,

    /// Maximum link depth from the seed
    pub max_depth: u32,

    /// Maximum number of successfully fetched pages
    pub max_pages: u32,

    /// Minimum time between two fetches to the same origin
    pub delay: Duration,

    /// Whether robots.txt rules are honored
    pub respect_robots: bool,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Skip responses whose Content-Type is not HTML
    pub html_only: bool,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Product token matched against robots.txt `User-agent` groups
    pub robots_agent: String,
}

impl CrawlConfig {
    /// Validates a loaded configuration and resolves it into run settings
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        validate(config)?;

        let crawler = &config.crawler;
        let seed = normalize_url(&crawler.seed_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", crawler.seed_url, e))
        })?;
        let scope = Scope::new(&seed, &config.scope)
            .map_err(|e| ConfigError::InvalidUrl(format!("Seed URL has no usable host: {}", e)))?;
        let delay = seconds_to_duration("delay-seconds", crawler.delay_seconds)?;
        let request_timeout =
            seconds_to_duration("request-timeout-seconds", crawler.request_timeout_seconds)?;

        Ok(Self {
            seed,
            scope,
            max_depth: crawler.max_depth,
            max_pages: crawler.max_pages,
            delay,
            respect_robots: crawler.respect_robots,
            request_timeout,
            html_only: crawler.html_only,
            user_agent: config.user_agent.header_value(),
            robots_agent: config.user_agent.crawler_name.clone(),
        })
    }

    /// Settings for `seed` with every other option at its default
    pub fn for_seed(seed: &str) -> Result<Self, ConfigError> {
        Self::from_config(&Config {
            crawler: CrawlerConfig::with_seed(seed),
            scope: ScopeConfig::default(),
            user_agent: UserAgentConfig::default(),
        })
    }
}

/// Converts a validated seconds value, rejecting values too large for a `Duration`
fn seconds_to_duration(field: &str, seconds: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(seconds).map_err(|e| {
        ConfigError::Validation(format!("crawler.{} = {} is out of range: {}", field, seconds, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_seed_defaults() {
        let config = CrawlConfig::for_seed("https://Example.com/start/#top").unwrap();

        assert_eq!(config.seed.as_str(), "https://example.com/start");
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.delay, Duration::from_secs(1));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.respect_robots);
        assert!(config.user_agent.starts_with("webtrawl/"));
        assert_eq!(config.robots_agent, "webtrawl");
        assert_eq!(config.scope.allowed_domains(), ["example.com".to_string()]);
    }

    #[test]
    fn test_fractional_delay() {
        let mut config = Config {
            crawler: CrawlerConfig::with_seed("https://example.com/"),
            scope: ScopeConfig::default(),
            user_agent: UserAgentConfig::default(),
        };
        config.crawler.delay_seconds = 0.25;

        let resolved = CrawlConfig::from_config(&config).unwrap();
        assert_eq!(resolved.delay, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_seed_is_config_error() {
        assert!(matches!(
            CrawlConfig::for_seed("not a url"),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(CrawlConfig::for_seed("ftp://example.com/").is_err());
    }

    #[test]
    fn test_oversized_durations_are_config_errors() {
        let mut config = Config {
            crawler: CrawlerConfig::with_seed("https://example.com/"),
            scope: ScopeConfig::default(),
            user_agent: UserAgentConfig::default(),
        };
        config.crawler.delay_seconds = 1e30;
        assert!(matches!(
            CrawlConfig::from_config(&config),
            Err(ConfigError::Validation(msg)) if msg.contains("delay-seconds")
        ));

        config.crawler.delay_seconds = 1.0;
        config.crawler.request_timeout_seconds = 1e30;
        assert!(matches!(
            CrawlConfig::from_config(&config),
            Err(ConfigError::Validation(msg)) if msg.contains("request-timeout-seconds")
        ));
    }
}
