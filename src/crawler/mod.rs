//! Crawler module for page rendering and crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - The page renderer abstraction and its HTTP-backed implementation
//! - Content and link extraction over a rendered page
//! - The breadth-first frontier and visited set
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod frontier;
mod http_renderer;
mod renderer;

pub use coordinator::Coordinator;
pub use extractor::{extract_content, extract_links};
pub use frontier::Frontier;
pub use http_renderer::HttpRenderer;
pub use renderer::{ElementHandle, PageRenderer, RenderError, RenderResult};

use crate::config::Config;
use crate::output::{CrawlReport, JsonFileSink};
use crate::GleanError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Launch the HTTP renderer, prefetching the content selector
/// 2. Open the JSON output file named in the configuration
/// 3. Walk pages breadth-first until the budget or the frontier runs out
/// 4. Close the renderer and report how the crawl ended
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(GleanError)` - Crawl failed
pub async fn crawl(config: Config) -> Result<CrawlReport, GleanError> {
    let renderer =
        HttpRenderer::launch(&config.renderer)?.with_prefetch(&config.crawl.selector)?;
    let sink = JsonFileSink::new(&config.crawl.output_file_name);

    let mut coordinator = Coordinator::new(config, renderer, sink)?;
    coordinator.run().await
}
