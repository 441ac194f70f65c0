//! Configuration module for Webtrawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and resolving them into the immutable [`CrawlConfig`] a run uses.
//!
//! # Example
//!
//! ```no_run
//! use webtrawl::config::{load_config, CrawlConfig};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("webtrawl.toml")).unwrap();
//! let settings = CrawlConfig::from_config(&config).unwrap();
//! println!("Crawling {} to depth {}", settings.seed, settings.max_depth);
//! ```

mod crawl_config;
mod parser;
mod types;
mod validation;

pub use crawl_config::CrawlConfig;
pub use types::{
    Config, CrawlerConfig, ScopeConfig, UserAgentConfig, DEFAULT_EXCLUDED_EXTENSIONS,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
