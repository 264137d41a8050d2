/// Page outcome definitions for crawl statistics
///
/// Every URL popped from the frontier ends in exactly one of these states.
use std::fmt;

/// How the visit to a single page ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Page was navigated and yielded non-empty content
    Crawled,

    /// Page was navigated but the selector was absent, timed out, or empty
    NoContent,

    /// Navigation did not finish within the bound
    NavigationTimeout,

    /// Navigation failed for another reason (HTTP error, connection refused)
    NavigationFailed,
}

impl PageState {
    /// Stable snake_case name, used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crawled => "crawled",
            Self::NoContent => "no_content",
            Self::NavigationTimeout => "navigation_timeout",
            Self::NavigationFailed => "navigation_failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
