//! HTML link discovery
//!
//! Pulls followable links out of a fetched page. Every link returned is an
//! absolute, normalized http(s) URL; scope filtering happens later in the
//! coordinator.

use crate::url::normalize_parsed;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Discovers the links on a page, in document order
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only hrefs (same page anchors)
/// - Anything that does not resolve to http or https
///
/// `rel="nofollow"` links are followed. Duplicates (after normalization)
/// keep their first position.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the page was served from, for resolving relative links
///
/// # Example
///
/// ```
/// use webtrawl::crawler::discover_links;
/// use url::Url;
///
/// let html = r#"<a href="/b">B</a><a href="/a#top">A</a><a href="/b/">B again</a>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let links = discover_links(html, &page_url);
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[0].as_str(), "https://example.com/b");
/// ```
pub fn discover_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&a_selector) {
        // Skip if it has the download attribute
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(url) = resolve_link(href, page_url) {
            if seen.insert(url.as_str().to_string()) {
                links.push(url);
            }
        }
    }

    links
}

/// Resolves a link href to a normalized absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let absolute = page_url.join(href).ok()?;
    match normalize_parsed(absolute) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::trace!("Dropping link {}: {}", href, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/dir/page").unwrap()
    }

    fn links_of(html: &str) -> Vec<String> {
        discover_links(html, &base_url())
            .into_iter()
            .map(|u| u.to_string())
            .collect()
    }

    #[test]
    fn test_absolute_link() {
        let links = links_of(r#"<a href="https://other.com/page">Link</a>"#);
        assert_eq!(links, vec!["https://other.com/page"]);
    }

    #[test]
    fn test_root_relative_link() {
        let links = links_of(r#"<a href="/other">Link</a>"#);
        assert_eq!(links, vec!["https://example.com/other"]);
    }

    #[test]
    fn test_path_relative_link() {
        let links = links_of(r#"<a href="sibling">Link</a><a href="../up">Up</a>"#);
        assert_eq!(
            links,
            vec!["https://example.com/dir/sibling", "https://example.com/up"]
        );
    }

    #[test]
    fn test_links_are_normalized() {
        let links = links_of(
            r#"<a href="HTTPS://EXAMPLE.COM:443//a//b/?utm_source=x&z=1&a=2#frag">Link</a>"#,
        );
        assert_eq!(links, vec!["https://example.com/a/b?a=2&z=1"]);
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"
            <a href="javascript:void(0)">JS</a>
            <a href="JavaScript:alert(1)">JS upper</a>
            <a href="mailto:test@example.com">Email</a>
            <a href="tel:+1234567890">Call</a>
            <a href="data:text/html,<h1>Test</h1>">Data</a>
            <a href="ftp://example.com/file">FTP</a>
        "#;
        assert!(links_of(html).is_empty());
    }

    #[test]
    fn test_skip_download_link() {
        let links = links_of(r#"<a href="/file.pdf" download>Download</a>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only_and_empty() {
        let links = links_of(r##"<a href="#section">Jump</a><a href="">Empty</a><a>None</a>"##);
        assert!(links.is_empty());
    }

    #[test]
    fn test_follow_nofollow_links() {
        let links = links_of(r#"<a href="/page" rel="nofollow">Link</a>"#);
        assert_eq!(links, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_ignores_non_anchor_resources() {
        let html = r#"
            <link rel="stylesheet" href="/style.css">
            <link rel="canonical" href="/canonical">
            <script src="/app.js"></script>
            <img src="/logo.png">
        "#;
        assert!(links_of(html).is_empty());
    }

    #[test]
    fn test_deduplicates_preserving_first_seen_order() {
        let html = r#"
            <a href="/b">B</a>
            <a href="/a">A</a>
            <a href="/b/">B slash</a>
            <a href="/a#part">A fragment</a>
            <a href="/c">C</a>
        "#;
        assert_eq!(
            links_of(html),
            vec![
                "https://example.com/b",
                "https://example.com/a",
                "https://example.com/c"
            ]
        );
    }

    #[test]
    fn test_malformed_html_still_yields_links() {
        let links = links_of(r#"<div><p><a href="/ok">unclosed<div></span>"#);
        assert_eq!(links, vec!["https://example.com/ok"]);
    }
}
