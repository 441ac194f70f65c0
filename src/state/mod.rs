//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlStatus`: the run-level state machine (idle, running, completed, aborted)
//! - `TaskOutcome`: how a single frontier task ended (fetched, disallowed, failed, ...)

mod crawl_status;
mod task_outcome;

pub use crawl_status::CrawlStatus;
pub use task_outcome::TaskOutcome;
