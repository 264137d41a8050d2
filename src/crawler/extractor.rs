//! Content and link extraction over a page renderer
//!
//! This module handles pulling data out of the currently loaded page:
//! - The text of the first element matching the content selector
//! - The raw `href` of every anchor element
//!
//! Neither operation can fail the crawl. Extraction problems collapse into
//! empty content or an empty link list.

use crate::crawler::renderer::{PageRenderer, RenderError};
use std::time::Duration;

/// Returns the inner text of the first element matching `selector`
///
/// Waits for the selector first, bounded by `timeout`. A timeout, a missing
/// element, or an element with no text all yield an empty string; callers
/// treat every one of them the same way.
///
/// # Arguments
///
/// * `page` - Renderer with a page already loaded
/// * `selector` - CSS selector for the content fragment
/// * `timeout` - Upper bound for the selector wait
pub async fn extract_content<R>(page: &mut R, selector: &str, timeout: Duration) -> String
where
    R: PageRenderer + ?Sized,
{
    match page.wait_for_selector(selector, timeout).await {
        Ok(()) => {}
        Err(RenderError::SelectorTimeout { .. }) => {
            tracing::debug!("Selector '{}' did not appear", selector);
            return String::new();
        }
        Err(e) => {
            tracing::warn!("Waiting for selector '{}' failed: {}", selector, e);
            return String::new();
        }
    }

    match page.query_one(selector).await {
        Ok(Some(element)) => element.inner_text().to_string(),
        Ok(None) => String::new(),
        Err(e) => {
            tracing::warn!("Querying selector '{}' failed: {}", selector, e);
            String::new()
        }
    }
}

/// Collects the `href` of every anchor on the current page
///
/// Anchors without an `href` (or with an empty one) are skipped. Hrefs are
/// returned raw, in document order; resolution happens in the caller.
pub async fn extract_links<R>(page: &R) -> Vec<String>
where
    R: PageRenderer + ?Sized,
{
    match page.query_all("a").await {
        Ok(anchors) => anchors
            .iter()
            .filter_map(|anchor| anchor.get_attribute("href"))
            .filter(|href| !href.is_empty())
            .map(str::to_string)
            .collect(),
        Err(e) => {
            tracing::warn!("Listing anchors failed: {}", e);
            Vec::new()
        }
    }
}
