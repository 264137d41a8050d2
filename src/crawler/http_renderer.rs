//! HTTP-backed page renderer
//!
//! This renderer loads documents with a plain HTTP GET and answers selector
//! queries against the static HTML. It covers:
//! - Building the HTTP client with a cookie jar and optional user agent
//! - Bounded navigation with timeout classification
//! - Selector presence checks and element snapshots via `scraper`
//! - Rendered-text extraction that skips script and style bodies
//!
//! A static document never changes after it loads, so a selector that is
//! absent right after navigation resolves as a selector timeout immediately
//! instead of waiting out the bound.

use crate::config::{CookieConfig, RendererConfig};
use crate::crawler::renderer::{ElementHandle, PageRenderer, RenderError, RenderResult};
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Elements whose text is never rendered
const HIDDEN_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Elements that start and end on their own line
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "caption", "dd", "details", "dialog", "div",
    "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary",
    "table", "tr", "ul",
];

/// Selector every crawl queries on every page
const ANCHOR_SELECTOR: &str = "a";

/// The document currently loaded in the session
///
/// Holds only owned snapshots; the parsed tree is dropped before
/// `navigate` returns.
#[derive(Debug)]
struct LoadedPage {
    url: Url,
    body: String,
    snapshots: HashMap<String, Vec<ElementHandle>>,
}

/// Page renderer over `reqwest` + `scraper`
pub struct HttpRenderer {
    client: Client,
    jar: Arc<Jar>,
    prefetch: Vec<String>,
    current: Option<LoadedPage>,
    closed: bool,
}

impl HttpRenderer {
    /// Builds the HTTP session
    ///
    /// # Arguments
    ///
    /// * `config` - Renderer tuning (timeouts, user agent)
    ///
    /// # Returns
    ///
    /// * `Ok(HttpRenderer)` - Ready to navigate
    /// * `Err(RenderError::Launch)` - The client could not be built
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sumi_glean::config::RendererConfig;
    /// use sumi_glean::crawler::HttpRenderer;
    ///
    /// let renderer = HttpRenderer::launch(&RendererConfig::default())
    ///     .unwrap()
    ///     .with_prefetch("main")
    ///     .unwrap();
    /// ```
    pub fn launch(config: &RendererConfig) -> RenderResult<Self> {
        let jar = Arc::new(Jar::default());

        let mut builder = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .connect_timeout(config.navigation_timeout())
            .gzip(true)
            .brotli(true);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder
            .build()
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        tracing::debug!("HTTP renderer launched");

        Ok(Self {
            client,
            jar,
            prefetch: vec![ANCHOR_SELECTOR.to_string()],
            current: None,
            closed: false,
        })
    }

    /// Snapshots `selector` while each page is parsed during navigation
    ///
    /// Queries for prefetched selectors are served without parsing the
    /// document again. Anchors are always prefetched.
    pub fn with_prefetch(mut self, selector: &str) -> RenderResult<Self> {
        parse_selector(selector)?;
        if !self.prefetch.iter().any(|s| s == selector) {
            self.prefetch.push(selector.to_string());
        }
        Ok(self)
    }

    /// URL of the document currently loaded, if any
    pub fn current_url(&self) -> Option<&Url> {
        self.current.as_ref().map(|page| &page.url)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> RenderResult<()> {
        if self.closed {
            Err(RenderError::Closed)
        } else {
            Ok(())
        }
    }

    /// Installs `body` as the current page, snapshotting prefetched selectors
    fn load(&mut self, url: Url, body: String) -> RenderResult<()> {
        let document = Html::parse_document(&body);
        let mut snapshots = HashMap::with_capacity(self.prefetch.len());
        for selector in &self.prefetch {
            let parsed = parse_selector(selector)?;
            snapshots.insert(selector.clone(), snapshot(&document, &parsed, None));
        }

        self.current = Some(LoadedPage {
            url,
            body,
            snapshots,
        });
        Ok(())
    }

    /// Runs `selector` against the loaded document and snapshots matches
    ///
    /// Kept synchronous: the parsed document is not `Send` and must never be
    /// held across an await point.
    fn select(&self, selector: &str, limit: Option<usize>) -> RenderResult<Vec<ElementHandle>> {
        self.ensure_open()?;
        let page = self.current.as_ref().ok_or(RenderError::NotNavigated)?;

        if let Some(cached) = page.snapshots.get(selector) {
            let take = limit.unwrap_or(cached.len());
            return Ok(cached.iter().take(take).cloned().collect());
        }

        let parsed = parse_selector(selector)?;
        let document = Html::parse_document(&page.body);
        Ok(snapshot(&document, &parsed, limit))
    }
}

fn parse_selector(selector: &str) -> RenderResult<Selector> {
    Selector::parse(selector).map_err(|_| RenderError::InvalidSelector(selector.to_string()))
}

fn snapshot(document: &Html, selector: &Selector, limit: Option<usize>) -> Vec<ElementHandle> {
    let matches = document.select(selector).map(|element| {
        let mut handle = ElementHandle::new(rendered_text(element));
        for (name, value) in element.value().attrs() {
            handle = handle.with_attribute(name, value);
        }
        handle
    });

    match limit {
        Some(n) => matches.take(n).collect(),
        None => matches.collect(),
    }
}

/// Text of `element` as a reader would see it
///
/// Hidden elements contribute nothing, block elements sit on their own lines,
/// and runs of whitespace inside a line collapse to one space.
fn rendered_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            // Source newlines are layout, not line breaks
            out.push_str(&text.replace('\n', " "));
            continue;
        }

        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if HIDDEN_ELEMENTS.contains(&name) {
            continue;
        }
        if name == "br" {
            out.push('\n');
            continue;
        }

        let block = BLOCK_ELEMENTS.contains(&name);
        if block {
            out.push('\n');
        }
        collect_text(child, out);
        if block {
            out.push('\n');
        }
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn navigate(&mut self, url: &Url, timeout: Duration) -> RenderResult<()> {
        self.ensure_open()?;
        self.current = None;

        let client = &self.client;
        let target = url.clone();
        let request = async move {
            let response = client.get(target).send().await?.error_for_status()?;
            response.text().await
        };

        let body = match tokio::time::timeout(timeout, request).await {
            Err(_) => {
                return Err(RenderError::NavigationTimeout {
                    url: url.to_string(),
                    timeout_ms: timeout.as_millis(),
                })
            }
            Ok(Err(e)) if e.is_timeout() => {
                return Err(RenderError::NavigationTimeout {
                    url: url.to_string(),
                    timeout_ms: timeout.as_millis(),
                })
            }
            Ok(Err(e)) => {
                return Err(RenderError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })
            }
            Ok(Ok(body)) => body,
        };

        tracing::trace!("Loaded {} ({} bytes)", url, body.len());
        self.load(url.clone(), body)
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> RenderResult<()> {
        if self.select(selector, Some(1))?.is_empty() {
            return Err(RenderError::SelectorTimeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis(),
            });
        }
        Ok(())
    }

    async fn query_one(&self, selector: &str) -> RenderResult<Option<ElementHandle>> {
        Ok(self.select(selector, Some(1))?.into_iter().next())
    }

    async fn query_all(&self, selector: &str) -> RenderResult<Vec<ElementHandle>> {
        self.select(selector, None)
    }

    async fn set_cookie(&mut self, cookie: &CookieConfig, url: &Url) -> RenderResult<()> {
        self.ensure_open()?;
        if cookie.name.is_empty() {
            return Err(RenderError::Cookie("cookie name is empty".to_string()));
        }
        self.jar
            .add_cookie_str(&format!("{}={}", cookie.name, cookie.value), url);
        tracing::debug!("Installed cookie '{}' for {}", cookie.name, url);
        Ok(())
    }

    async fn close(&mut self) -> RenderResult<()> {
        self.ensure_open()?;
        self.closed = true;
        self.current = None;
        tracing::debug!("HTTP renderer closed");
        Ok(())
    }
}
