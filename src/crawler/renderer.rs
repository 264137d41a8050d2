//! Page renderer abstraction
//!
//! The orchestrator never touches concrete DOM types. It drives a
//! [`PageRenderer`], which navigates a single reusable page session and
//! answers selector queries with detached [`ElementHandle`] snapshots. Any
//! browser-automation backend can sit behind this trait; the crate ships
//! [`HttpRenderer`](super::HttpRenderer) for static documents.

use crate::config::CookieConfig;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors reported by a page renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch renderer: {0}")]
    Launch(String),

    #[error("Navigation to {url} timed out after {timeout_ms}ms")]
    NavigationTimeout { url: String, timeout_ms: u128 },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Selector '{selector}' did not appear within {timeout_ms}ms")]
    SelectorTimeout { selector: String, timeout_ms: u128 },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("No page has been loaded yet")]
    NotNavigated,

    #[error("Renderer session is closed")]
    Closed,

    #[error("Failed to set cookie: {0}")]
    Cookie(String),
}

impl RenderError {
    /// Returns true for the two bounded-wait outcomes
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::NavigationTimeout { .. } | Self::SelectorTimeout { .. }
        )
    }
}

/// Result type for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Snapshot of a DOM element taken at query time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementHandle {
    inner_text: String,
    attributes: HashMap<String, String>,
}

impl ElementHandle {
    pub fn new(inner_text: impl Into<String>) -> Self {
        Self {
            inner_text: inner_text.into(),
            attributes: HashMap::new(),
        }
    }

    /// Adds an attribute, builder style
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Rendered text of the element and its descendants
    pub fn inner_text(&self) -> &str {
        &self.inner_text
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A single page session that can be navigated and queried
///
/// Implementations own exactly one underlying session; the orchestrator calls
/// [`close`](PageRenderer::close) once when the crawl ends, on every exit path.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Loads `url`, giving up after `timeout`
    ///
    /// Returns `RenderError::NavigationTimeout` when the bound is hit and
    /// `RenderError::Navigation` for every other failure.
    async fn navigate(&mut self, url: &Url, timeout: Duration) -> RenderResult<()>;

    /// Waits until `selector` is present on the current page
    ///
    /// Returns `RenderError::SelectorTimeout` if it never appears.
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> RenderResult<()>;

    /// First element matching `selector`, if any
    async fn query_one(&self, selector: &str) -> RenderResult<Option<ElementHandle>>;

    /// Every element matching `selector`, in document order
    async fn query_all(&self, selector: &str) -> RenderResult<Vec<ElementHandle>>;

    /// Installs a cookie scoped to `url`; called before any navigation
    async fn set_cookie(&mut self, cookie: &CookieConfig, url: &Url) -> RenderResult<()>;

    /// Releases the underlying session
    async fn close(&mut self) -> RenderResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_handle_attributes() {
        let handle = ElementHandle::new("Docs")
            .with_attribute("href", "/docs")
            .with_attribute("class", "nav-link");

        assert_eq!(handle.inner_text(), "Docs");
        assert_eq!(handle.get_attribute("href"), Some("/docs"));
        assert_eq!(handle.get_attribute("class"), Some("nav-link"));
        assert_eq!(handle.get_attribute("title"), None);
    }

    #[test]
    fn test_is_timeout() {
        assert!(RenderError::NavigationTimeout {
            url: "https://x.test/".to_string(),
            timeout_ms: 3000,
        }
        .is_timeout());
        assert!(RenderError::SelectorTimeout {
            selector: "body".to_string(),
            timeout_ms: 3000,
        }
        .is_timeout());

        assert!(!RenderError::Navigation {
            url: "https://x.test/".to_string(),
            message: "HTTP 404".to_string(),
        }
        .is_timeout());
        assert!(!RenderError::Closed.is_timeout());
    }

    #[test]
    fn test_error_messages() {
        let err = RenderError::NavigationTimeout {
            url: "https://x.test/a".to_string(),
            timeout_ms: 3000,
        };
        assert_eq!(
            err.to_string(),
            "Navigation to https://x.test/a timed out after 3000ms"
        );
    }
}
