//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop, which:
//! - Seeds the frontier and injects the configured cookie
//! - Navigates each popped URL with a bounded wait
//! - Extracts content and checkpoints results after every success
//! - Discovers anchors, filters them by pattern, and enqueues new URLs
//! - Stops on budget or frontier exhaustion and releases the renderer

use crate::config::{validate, Config};
use crate::crawler::extractor::{extract_content, extract_links};
use crate::crawler::frontier::Frontier;
use crate::crawler::renderer::PageRenderer;
use crate::output::{
    CrawlReport, CrawlResult, CrawlStatistics, JsonFileSink, ResultSink, ResultStore,
};
use crate::state::{CrawlState, PageState, TerminationReason};
use crate::url::{classify_link, GlobPattern, LinkDecision, NormalizedUrl};
use crate::GleanError;
use chrono::Utc;
use std::sync::Arc;

/// Main crawler coordinator structure
///
/// Exclusively owns the renderer session, the frontier, and the result
/// store for the lifetime of one crawl.
pub struct Coordinator<R, S = JsonFileSink> {
    config: Arc<Config>,
    renderer: R,
    sink: S,
    frontier: Frontier,
    store: ResultStore,
    pattern: GlobPattern,
    seed: NormalizedUrl,
    state: CrawlState,
    statistics: CrawlStatistics,
    pages_visited: u64,
}

impl<R: PageRenderer, S: ResultSink> Coordinator<R, S> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawl configuration
    /// * `renderer` - An already launched page renderer
    /// * `sink` - Where checkpoints are written
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(GleanError)` - The configuration is invalid
    pub fn new(config: Config, renderer: R, sink: S) -> Result<Self, GleanError> {
        validate(&config)?;

        let seed = NormalizedUrl::parse(&config.crawl.url)?;
        let pattern = GlobPattern::new(&config.crawl.match_pattern);

        Ok(Self {
            config: Arc::new(config),
            renderer,
            sink,
            frontier: Frontier::new(),
            store: ResultStore::new(),
            pattern,
            seed,
            state: CrawlState::Running,
            statistics: CrawlStatistics::new(),
            pages_visited: 0,
        })
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Results recorded so far, in processing order
    pub fn results(&self) -> &[CrawlResult] {
        self.store.snapshot_all()
    }

    pub fn statistics(&self) -> &CrawlStatistics {
        &self.statistics
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs the crawl to completion
    ///
    /// The renderer is closed exactly once when this returns, whether the
    /// crawl finished or failed part-way.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl terminated normally
    /// * `Err(GleanError)` - Cookie injection or a checkpoint failed, or the
    ///   crawl had already run
    pub async fn run(&mut self) -> Result<CrawlReport, GleanError> {
        if !self.state.is_running() {
            return Err(GleanError::InvalidTransition {
                from: self.state,
                to: CrawlState::Running,
            });
        }

        let started_at = Utc::now();
        tracing::info!(
            "Starting crawl at {} (pattern: {}, budget: {} pages)",
            self.seed,
            self.pattern.as_str(),
            self.config.crawl.max_pages_to_crawl
        );

        let outcome = self.crawl_loop().await;

        if let Err(e) = self.renderer.close().await {
            tracing::warn!("Failed to close renderer: {}", e);
        }

        let termination = outcome?;
        let finished_at = Utc::now();

        tracing::info!(
            "Crawl finished ({}): {} results from {} pages in {:?}",
            termination,
            self.store.len(),
            self.pages_visited,
            (finished_at - started_at).to_std().unwrap_or_default()
        );

        Ok(CrawlReport {
            termination,
            results: self.store.len(),
            statistics: self.statistics.clone(),
            started_at,
            finished_at,
            output: self.sink.describe(),
        })
    }

    async fn crawl_loop(&mut self) -> Result<TerminationReason, GleanError> {
        if let Some(cookie) = &self.config.cookie {
            self.renderer
                .set_cookie(cookie, self.seed.as_url())
                .await?;
        }

        self.frontier.push(self.seed.clone());
        let max_pages = self.config.crawl.max_pages_to_crawl;

        while !self.frontier.is_empty() && self.store.len() < max_pages {
            // Frontier entries are fragment-free by construction
            let Some(url) = self.frontier.pop() else {
                break;
            };

            let outcome = self.process_page(&url).await?;
            self.statistics.record_page(outcome);
        }

        // An empty frontier wins when both stop conditions hold at once
        let reason = if self.frontier.is_empty() {
            TerminationReason::FrontierExhausted
        } else {
            TerminationReason::BudgetReached
        };
        self.state.terminate(reason)?;

        self.checkpoint()?;
        Ok(reason)
    }

    /// Visits a single URL
    ///
    /// Navigation failures are logged and skip the page entirely, including
    /// its links. Empty content still lets links be discovered.
    async fn process_page(&mut self, url: &NormalizedUrl) -> Result<PageState, GleanError> {
        self.pages_visited += 1;
        tracing::debug!("Visiting page {} at {}", self.pages_visited, url);

        let navigation_timeout = self.config.renderer.navigation_timeout();
        if let Err(e) = self
            .renderer
            .navigate(url.as_url(), navigation_timeout)
            .await
        {
            tracing::warn!("Skipping {}: {}", url, e);
            return Ok(if e.is_timeout() {
                PageState::NavigationTimeout
            } else {
                PageState::NavigationFailed
            });
        }

        let selector_timeout = self.config.renderer.selector_timeout();
        let content =
            extract_content(&mut self.renderer, &self.config.crawl.selector, selector_timeout)
                .await;

        let outcome = if content.is_empty() {
            tracing::debug!("No content at {}", url);
            PageState::NoContent
        } else {
            self.store.append(CrawlResult::new(url.as_str(), content));
            tracing::info!("Crawling page {} at {}", self.pages_visited, url);
            self.checkpoint()?;
            PageState::Crawled
        };

        self.discover_links(url).await;
        Ok(outcome)
    }

    /// Resolves every anchor on the current page and enqueues eligible ones
    async fn discover_links(&mut self, base: &NormalizedUrl) {
        let hrefs = extract_links(&self.renderer).await;
        let mut enqueued = 0;

        for href in &hrefs {
            let (candidate, decision) = classify_link(href, base.as_url(), &self.pattern);
            let decision = match candidate {
                Some(next) => {
                    if self.frontier.push(next) {
                        LinkDecision::Enqueue
                    } else {
                        LinkDecision::AlreadySeen
                    }
                }
                None => decision,
            };

            if decision.is_enqueued() {
                enqueued += 1;
            }
            self.statistics.record_link(decision);
        }

        tracing::debug!(
            "{} links on {}, {} enqueued, {} in frontier",
            hrefs.len(),
            base,
            enqueued,
            self.frontier.len()
        );
    }

    /// Writes the full result set to the sink
    fn checkpoint(&mut self) -> Result<(), GleanError> {
        self.store.persist(&mut self.sink)?;
        self.statistics.record_checkpoint();
        Ok(())
    }
}
