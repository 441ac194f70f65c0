use crate::extract::strategies::collapse_whitespace;
use scraper::{Html, Selector};

/// Longest title kept, in characters
pub const MAX_TITLE_CHARS: usize = 200;

/// Where a title may come from, in order of preference
enum TitleSource {
    Text(&'static str),
    MetaContent(&'static str),
}

const TITLE_SOURCES: &[TitleSource] = &[
    TitleSource::Text("title"),
    TitleSource::Text("h1"),
    TitleSource::MetaContent("meta[property=\"og:title\"]"),
    TitleSource::MetaContent("meta[name=\"title\"]"),
];

/// Finds the page title
///
/// Tries `<title>`, the first `<h1>`, `og:title` and `<meta name="title">`
/// in that order. The result is whitespace-collapsed and cut to
/// [`MAX_TITLE_CHARS`] characters.
pub fn extract_title(document: &Html) -> Option<String> {
    TITLE_SOURCES.iter().find_map(|source| {
        let raw = match source {
            TitleSource::Text(css) => {
                let selector = Selector::parse(css).ok()?;
                let element = document.select(&selector).next()?;
                element.text().collect::<String>()
            }
            TitleSource::MetaContent(css) => {
                let selector = Selector::parse(css).ok()?;
                let element = document.select(&selector).next()?;
                element.value().attr("content")?.to_string()
            }
        };

        let title = collapse_whitespace(&raw);
        if title.is_empty() {
            None
        } else {
            Some(title.chars().take(MAX_TITLE_CHARS).collect())
        }
    })
}
