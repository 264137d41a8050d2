use serde::Deserialize;
use std::time::Duration;

/// Default bound for page navigation, in milliseconds
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 3000;

/// Default bound for the selector wait, in milliseconds
pub const DEFAULT_SELECTOR_TIMEOUT_MS: u64 = 3000;

/// Main configuration structure for Sumi-Glean
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,

    /// Optional cookie injected once before the first navigation
    #[serde(default)]
    pub cookie: Option<CookieConfig>,

    #[serde(default)]
    pub renderer: RendererConfig,
}

/// What to crawl and where to put the results
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Seed URL; trusted unconditionally even if it does not match the pattern
    pub url: String,

    /// Glob pattern every followed link must match
    #[serde(rename = "match")]
    pub match_pattern: String,

    /// CSS selector for the fragment whose text is recorded
    pub selector: String,

    /// Maximum number of pages that may contribute a result
    #[serde(rename = "max-pages-to-crawl")]
    pub max_pages_to_crawl: usize,

    /// Path of the JSON output file
    #[serde(rename = "output-file-name")]
    pub output_file_name: String,
}

/// A single cookie, scoped to the seed URL
#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    pub name: String,
    pub value: String,
}

/// Page renderer tuning
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// Upper bound for a single navigation (milliseconds)
    #[serde(rename = "navigation-timeout-ms", default = "default_navigation_timeout")]
    pub navigation_timeout_ms: u64,

    /// Upper bound for waiting on the content selector (milliseconds)
    #[serde(rename = "selector-timeout-ms", default = "default_selector_timeout")]
    pub selector_timeout_ms: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            selector_timeout_ms: DEFAULT_SELECTOR_TIMEOUT_MS,
            user_agent: None,
        }
    }
}

impl RendererConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }
}

fn default_navigation_timeout() -> u64 {
    DEFAULT_NAVIGATION_TIMEOUT_MS
}

fn default_selector_timeout() -> u64 {
    DEFAULT_SELECTOR_TIMEOUT_MS
}
