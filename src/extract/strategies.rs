use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Elements whose text is never part of the readable content
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "form",
];

/// class/id words that mark page chrome rather than content
const BOILERPLATE_WORDS: &[&str] = &[
    "nav",
    "navbar",
    "navigation",
    "menu",
    "sidebar",
    "ad",
    "ads",
    "advert",
    "advertisement",
    "social",
    "share",
    "sharing",
    "comment",
    "comments",
    "breadcrumb",
    "breadcrumbs",
    "pagination",
    "related",
];

/// Containers tried in order by [`MainContentStrategy`]
const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role=\"main\"]",
    ".content",
    "#content",
    ".post",
    ".entry",
    ".story",
    ".article-body",
];

/// One way of pulling readable text out of a document
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whitespace-collapsed text, or None if this strategy found nothing
    fn extract_text(&self, document: &Html) -> Option<String>;
}

/// Text of the first recognizable main-content container
#[derive(Debug, Default, Clone, Copy)]
pub struct MainContentStrategy;

impl ExtractionStrategy for MainContentStrategy {
    fn name(&self) -> &'static str {
        "main-content"
    }

    fn extract_text(&self, document: &Html) -> Option<String> {
        MAIN_CONTENT_SELECTORS.iter().find_map(|css| {
            let selector = Selector::parse(css).ok()?;
            let container = document.select(&selector).next()?;
            non_empty(visible_text(container))
        })
    }
}

/// All visible text of `<body>`
#[derive(Debug, Default, Clone, Copy)]
pub struct BodyTextStrategy;

impl ExtractionStrategy for BodyTextStrategy {
    fn name(&self) -> &'static str {
        "body-text"
    }

    fn extract_text(&self, document: &Html) -> Option<String> {
        let selector = Selector::parse("body").ok()?;
        let body = document.select(&selector).next()?;
        non_empty(visible_text(body))
    }
}

/// Collects the text under `root`, skipping boilerplate subtrees
pub(crate) fn visible_text(root: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(root, &mut out);
    collapse_whitespace(&out)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !is_boilerplate(child_el) {
                        collect_text(child_el, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Returns true for elements that hold navigation, ads or other page chrome
pub(crate) fn is_boilerplate(element: ElementRef<'_>) -> bool {
    let value = element.value();

    if BOILERPLATE_TAGS.contains(&value.name()) {
        return true;
    }

    value
        .classes()
        .chain(value.id())
        .any(names_boilerplate)
}

/// Checks a class or id token word by word ("main-nav", "share_bar", ...)
fn names_boilerplate(token: &str) -> bool {
    token
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| BOILERPLATE_WORDS.contains(&word.to_ascii_lowercase().as_str()))
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
