//! URL handling module for Sumi-Glean
//!
//! This module provides fragment-insensitive URL normalization and the glob
//! matcher that decides which discovered links are eligible for crawling.

mod matcher;
mod normalize;

// Re-export main functions
pub use matcher::{matches, GlobPattern};
pub use normalize::{normalize, NormalizedUrl};

/// Why a discovered href was or was not pushed to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkDecision {
    /// Matches the pattern and was not seen before
    Enqueue,
    /// Could not be resolved to an absolute URL
    Malformed,
    /// Resolved, but outside the match pattern
    OutOfPattern,
    /// Already queued or processed
    AlreadySeen,
}

impl LinkDecision {
    /// Returns true if the link goes to the frontier
    pub fn is_enqueued(&self) -> bool {
        matches!(self, Self::Enqueue)
    }
}

/// Resolves an href and checks it against the pattern
///
/// Visited-set membership is not checked here; the frontier owns that and
/// reports [`LinkDecision::AlreadySeen`] itself.
///
/// # Arguments
///
/// * `href` - Raw href attribute value
/// * `base` - URL of the page the href was found on
/// * `pattern` - Compiled match pattern
///
/// # Returns
///
/// The normalized URL when it is eligible, along with the decision
pub fn classify_link(
    href: &str,
    base: &::url::Url,
    pattern: &GlobPattern,
) -> (Option<NormalizedUrl>, LinkDecision) {
    let normalized = match normalize(href, base) {
        Ok(n) => n,
        Err(e) => {
            tracing::debug!("Dropping malformed link: {}", e);
            return (None, LinkDecision::Malformed);
        }
    };

    // Patterns may be written with either escaped or literal characters
    if !pattern.matches(normalized.as_str()) && !pattern.matches(&normalized.decoded()) {
        tracing::trace!("Link {} is outside pattern {}", normalized, pattern.as_str());
        return (None, LinkDecision::OutOfPattern);
    }

    (Some(normalized), LinkDecision::Enqueue)
}
