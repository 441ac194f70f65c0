//! URL handling module for Webtrawl
//!
//! This module provides URL normalization, origin and domain extraction,
//! allowed-domain pattern matching, and the crawl [`Scope`].

mod domain;
mod matcher;
mod normalize;

use crate::config::ScopeConfig;
use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, origin_of};
pub use matcher::matches_domain;
pub use normalize::{normalize_parsed, normalize_url};

/// Why a discovered URL was left out of the crawl
///
/// Scope violations are filtered silently; they are not crawl failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeViolation {
    /// Not an http or https URL
    Scheme,
    /// Host is not covered by the allowed domains
    Domain,
    /// Path ends in an excluded resource extension
    Resource,
}

impl fmt::Display for ScopeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Scheme => "unsupported scheme",
            Self::Domain => "outside allowed domains",
            Self::Resource => "excluded resource type",
        };
        f.write_str(reason)
    }
}

/// The set of URLs eligible for fetching in one crawl
#[derive(Debug, Clone)]
pub struct Scope {
    allowed_domains: Vec<String>,
    allow_external: bool,
    excluded_extensions: Vec<String>,
}

impl Scope {
    /// Builds the scope for a crawl seeded at `seed`
    ///
    /// With no allowed-domain patterns configured, the scope is the seed's
    /// exact host.
    pub fn new(seed: &Url, config: &ScopeConfig) -> UrlResult<Self> {
        let seed_host = extract_domain(seed).ok_or(UrlError::MissingDomain)?;

        let allowed_domains = if config.allowed_domains.is_empty() {
            vec![seed_host]
        } else {
            config
                .allowed_domains
                .iter()
                .map(|d| d.to_ascii_lowercase())
                .collect()
        };

        Ok(Self {
            allowed_domains,
            allow_external: config.allow_external,
            excluded_extensions: config
                .excluded_extensions
                .iter()
                .map(|e| e.to_ascii_lowercase())
                .collect(),
        })
    }

    /// The allowed-domain patterns in effect
    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    /// Whether links to any host are followed
    pub fn allows_external(&self) -> bool {
        self.allow_external
    }

    /// Checks whether `url` may be fetched, reporting why not
    pub fn check(&self, url: &Url) -> Result<(), ScopeViolation> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ScopeViolation::Scheme);
        }

        let Some(host) = url.host_str() else {
            return Err(ScopeViolation::Domain);
        };

        if !self.allow_external
            && !self
                .allowed_domains
                .iter()
                .any(|pattern| matches_domain(pattern, host))
        {
            return Err(ScopeViolation::Domain);
        }

        let path = url.path().to_ascii_lowercase();
        if self
            .excluded_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
        {
            return Err(ScopeViolation::Resource);
        }

        Ok(())
    }

    /// Returns true if `url` may be fetched
    pub fn contains(&self, url: &Url) -> bool {
        self.check(url).is_ok()
    }
}
