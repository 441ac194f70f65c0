/// Run-level state definitions for a crawl
use std::fmt;

/// Represents where a crawl run is in its lifecycle
///
/// `Idle → Running → (Completed | Aborted)`. A run that fails validation
/// never leaves `Idle`; once running, only caller cancellation leads to
/// `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlStatus {
    /// Configuration captured and frontier seeded, nothing fetched yet
    Idle,

    /// The crawl loop is pulling tasks from the frontier
    Running,

    // ===== Terminal States =====
    /// The frontier was exhausted or the page limit was reached
    Completed,

    /// The caller cancelled the run; recorded pages are kept
    Aborted,
}

impl CrawlStatus {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted)
    }

    /// Returns true if `next` is a legal successor of this status
    pub fn can_transition_to(&self, next: CrawlStatus) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Idle, Self::Aborted)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Aborted)
        )
    }

    /// Returns a short lowercase label for logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
