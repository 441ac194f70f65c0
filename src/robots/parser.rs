//! Robots.txt parser implementation
//!
//! Rule matching is delegated to the robotstxt crate; this module adds
//! malformed-body detection and Crawl-delay extraction.

use crate::robots::RobotsError;
use robotstxt::DefaultMatcher;

/// Directives we recognize when deciding whether a body is robots text at all
const KNOWN_DIRECTIVES: &[&str] = &[
    "user-agent",
    "allow",
    "disallow",
    "crawl-delay",
    "sitemap",
    "host",
    "noindex",
    "request-rate",
    "visit-time",
    "clean-param",
];

/// Parsed robots.txt data
///
/// A wrapper around the robotstxt crate's matcher providing a simplified
/// interface for checking if URLs are allowed.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
    /// Whether to allow all (true = allow all, false = parse content)
    allow_all: bool,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content without checks
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Parses a robots.txt body, rejecting bodies that are not robots text
    ///
    /// An empty body is a valid allow-all file. A body that looks like an
    /// HTML page, or contains no recognizable directive, is malformed.
    pub fn parse(content: &str) -> Result<Self, RobotsError> {
        let trimmed = content.trim_start_matches('\u{feff}').trim();

        if trimmed.is_empty() {
            return Ok(Self::allow_all());
        }

        if trimmed.starts_with('<') {
            return Err(RobotsError::Malformed(
                "body looks like HTML".to_string(),
            ));
        }

        let has_directive = trimmed
            .lines()
            .filter_map(directive)
            .any(|(key, _)| KNOWN_DIRECTIVES.contains(&key.as_str()));

        if !has_directive {
            return Err(RobotsError::Malformed(
                "no recognizable directives".to_string(),
            ));
        }

        Ok(Self::from_content(content))
    }

    /// Creates a permissive ParsedRobots that allows everything
    ///
    /// This is used when robots.txt is absent or cannot be fetched or parsed.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Returns true if this is the permissive allow-all rule set
    pub fn is_allow_all(&self) -> bool {
        self.allow_all || self.content.is_empty()
    }

    /// Checks if a URL is allowed for the given user agent product token
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The product token, e.g. "webtrawl"
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.is_allow_all() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Gets the crawl delay (seconds) for a user agent product token
    ///
    /// A group naming the agent takes precedence over the `*` group.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        if self.is_allow_all() {
            return None;
        }

        let agent = user_agent.to_lowercase();

        let mut group_agents: Vec<String> = Vec::new();
        let mut in_agent_lines = false;
        let mut delay_for_wildcard: Option<f64> = None;
        let mut delay_for_agent: Option<f64> = None;

        for (key, value) in self.content.lines().filter_map(directive) {
            if key == "user-agent" {
                // A user-agent line after other directives starts a new group
                if !in_agent_lines {
                    group_agents.clear();
                }
                in_agent_lines = true;
                group_agents.push(value.to_lowercase());
                continue;
            }

            in_agent_lines = false;

            if key != "crawl-delay" {
                continue;
            }

            let Ok(delay) = value.parse::<f64>() else {
                continue;
            };
            if !delay.is_finite() || delay < 0.0 {
                continue;
            }

            if group_agents.iter().any(|ua| *ua == agent) {
                delay_for_agent.get_or_insert(delay);
            } else if group_agents.iter().any(|ua| ua == "*") {
                delay_for_wildcard.get_or_insert(delay);
            }
        }

        delay_for_agent.or(delay_for_wildcard)
    }
}

/// Splits a robots line into a lowercase key and trimmed value
fn directive(line: &str) -> Option<(String, String)> {
    let line = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    let (key, value) = line.trim().split_once(':')?;
    Some((key.trim().to_lowercase(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENT: &str = "TestBot";

    #[test]
    fn test_allow_all() {
        let robots = ParsedRobots::allow_all();
        assert!(robots.is_allowed("https://example.com/any/path", AGENT));
        assert!(robots.is_allowed("https://example.com/admin", AGENT));
    }

    #[test]
    fn test_parse_disallow_all() {
        let robots = ParsedRobots::parse("User-agent: *\nDisallow: /").unwrap();
        assert!(!robots.is_allowed("https://example.com/", AGENT));
        assert!(!robots.is_allowed("https://example.com/page", AGENT));
    }

    #[test]
    fn test_parse_disallow_prefix() {
        let robots = ParsedRobots::parse("User-agent: *\nDisallow: /private/").unwrap();
        assert!(robots.is_allowed("https://example.com/", AGENT));
        assert!(robots.is_allowed("https://example.com/public", AGENT));
        assert!(!robots.is_allowed("https://example.com/private/", AGENT));
        assert!(!robots.is_allowed("https://example.com/private/secret", AGENT));
    }

    #[test]
    fn test_parse_allow_and_disallow() {
        let content = "User-agent: *\nDisallow: /private\nAllow: /private/public";
        let robots = ParsedRobots::parse(content).unwrap();
        assert!(!robots.is_allowed("https://example.com/private", AGENT));
        assert!(robots.is_allowed("https://example.com/private/public", AGENT));
    }

    #[test]
    fn test_parse_specific_user_agent() {
        let content = "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /";
        let robots = ParsedRobots::parse(content).unwrap();
        assert!(robots.is_allowed("https://example.com/page", "GoodBot"));
        assert!(!robots.is_allowed("https://example.com/page", "BadBot"));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let result = ParsedRobots::parse("This is not valid robots.txt {{{");
        assert!(matches!(result, Err(RobotsError::Malformed(_))));
    }

    #[test]
    fn test_html_body_is_malformed() {
        let result = ParsedRobots::parse("<!doctype html><html><body>Not found</body></html>");
        assert!(matches!(result, Err(RobotsError::Malformed(_))));
    }

    #[test]
    fn test_unchecked_garbage_still_allows() {
        let robots = ParsedRobots::from_content("This is not valid robots.txt {{{");
        assert!(robots.is_allowed("https://example.com/any/path", AGENT));
    }

    #[test]
    fn test_empty_robots_txt() {
        let robots = ParsedRobots::parse("  \n").unwrap();
        assert!(robots.is_allow_all());
        assert!(robots.is_allowed("https://example.com/any/path", AGENT));
    }

    #[test]
    fn test_comments_ignored() {
        let content = "# hello\nUser-agent: * # everyone\nDisallow: /tmp # scratch";
        let robots = ParsedRobots::parse(content).unwrap();
        assert!(!robots.is_allowed("https://example.com/tmp/x", AGENT));
    }

    #[test]
    fn test_crawl_delay_wildcard() {
        let robots = ParsedRobots::parse("User-agent: *\nCrawl-delay: 10\nDisallow: /admin").unwrap();
        assert_eq!(robots.crawl_delay(AGENT), Some(10.0));
        assert_eq!(robots.crawl_delay("AnyBot"), Some(10.0));
    }

    #[test]
    fn test_crawl_delay_specific_agent() {
        let content = "User-agent: TestBot\nCrawl-delay: 5\n\nUser-agent: *\nCrawl-delay: 10";
        let robots = ParsedRobots::parse(content).unwrap();
        assert_eq!(robots.crawl_delay("TestBot"), Some(5.0));
        assert_eq!(robots.crawl_delay("OtherBot"), Some(10.0));
    }

    #[test]
    fn test_crawl_delay_group_after_rules() {
        let content = "User-agent: *\nDisallow: /x\n\nUser-agent: SlowBot\nCrawl-delay: 30";
        let robots = ParsedRobots::parse(content).unwrap();
        assert_eq!(robots.crawl_delay("SlowBot"), Some(30.0));
        assert_eq!(robots.crawl_delay(AGENT), None);
    }

    #[test]
    fn test_crawl_delay_decimal_and_case() {
        let robots = ParsedRobots::parse("USER-AGENT: testbot\ncrawl-delay: 2.5").unwrap();
        assert_eq!(robots.crawl_delay("TestBot"), Some(2.5));
    }

    #[test]
    fn test_crawl_delay_invalid_value_ignored() {
        let robots = ParsedRobots::parse("User-agent: *\nCrawl-delay: soon").unwrap();
        assert_eq!(robots.crawl_delay(AGENT), None);
    }

    #[test]
    fn test_crawl_delay_multiple_user_agents() {
        let robots = ParsedRobots::parse("User-agent: BotA\nUser-agent: BotB\nCrawl-delay: 3").unwrap();
        assert_eq!(robots.crawl_delay("BotA"), Some(3.0));
        assert_eq!(robots.crawl_delay("BotB"), Some(3.0));
        assert_eq!(robots.crawl_delay("BotC"), None);
    }
}
