//! Output module for presenting crawl results
//!
//! This module handles:
//! - Summarizing each fetched page (title, word count)
//! - Recording and displaying crawl statistics

pub mod stats;

pub use stats::{print_statistics, CrawlStatistics};

use crate::crawler::CrawlReport;
use crate::extract::Extractor;

/// One line of the page listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub url: String,
    pub depth: u32,
    pub status: u16,
    pub title: Option<String>,
    pub word_count: usize,
}

/// Runs the extractor over every fetched page, in fetch order
///
/// # Arguments
///
/// * `report` - The finished crawl
/// * `extractor` - Strategy chain used for titles and text
pub fn summarize_pages(report: &CrawlReport, extractor: &Extractor) -> Vec<PageSummary> {
    report
        .pages
        .iter()
        .map(|page| {
            let content = extractor.extract(&page.body, &page.final_url);
            let word_count = content.word_count();
            PageSummary {
                url: page.url.to_string(),
                depth: page.depth,
                status: page.status,
                title: content.title,
                word_count,
            }
        })
        .collect()
}

/// Prints the page listing to stdout
pub fn print_pages(pages: &[PageSummary]) {
    println!("=== Pages ({}) ===\n", pages.len());

    for (index, page) in pages.iter().enumerate() {
        println!(
            "{:>3}. [depth {}] {} {}",
            index + 1,
            page.depth,
            page.status,
            page.url
        );
        println!(
            "     {} ({} words)",
            page.title.as_deref().unwrap_or("(untitled)"),
            page.word_count
        );
    }
    println!();
}
