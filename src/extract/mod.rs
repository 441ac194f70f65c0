//! Readable-content extraction for fetched pages
//!
//! An [`Extractor`] runs an ordered list of [`ExtractionStrategy`]s over a
//! document and keeps the first non-empty text. The default order tries the
//! main-content container before falling back to the whole body.

mod strategies;
mod title;

pub use strategies::{BodyTextStrategy, ExtractionStrategy, MainContentStrategy};
pub use title::{extract_title, MAX_TITLE_CHARS};

use crate::crawler::discover_links;
use scraper::Html;
use url::Url;

/// Text, title and links of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Whitespace-collapsed readable text (empty if no strategy found any)
    pub text: String,

    pub title: Option<String>,

    /// Normalized links in document order
    pub links: Vec<Url>,

    /// Name of the strategy that produced `text`
    pub strategy: Option<&'static str>,
}

impl ExtractedContent {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Ordered fallback chain of extraction strategies
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Extractor {
    /// Creates an extractor that tries `strategies` in order
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Extracts text, title and links from `html` served at `url`
    pub fn extract(&self, html: &str, url: &Url) -> ExtractedContent {
        let document = Html::parse_document(html);

        let found = self.strategies.iter().find_map(|strategy| {
            let text = strategy.extract_text(&document)?;
            tracing::trace!("{} extracted {} bytes from {}", strategy.name(), text.len(), url);
            Some((text, strategy.name()))
        });

        let (text, strategy) = match found {
            Some((text, name)) => (text, Some(name)),
            None => {
                tracing::debug!("No readable text found in {}", url);
                (String::new(), None)
            }
        };

        ExtractedContent {
            text,
            title: extract_title(&document),
            links: discover_links(html, url),
            strategy,
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(vec![
            Box::new(MainContentStrategy),
            Box::new(BodyTextStrategy),
        ])
    }
}
