//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: Running until the crawl stops with a `TerminationReason`
//! - `PageState`: Tracks the outcome of individual pages (queued, crawled, timed out, etc.)

mod crawl_state;
mod page_state;

// Re-export main types
pub use crawl_state::{CrawlState, TerminationReason};
pub use page_state::PageState;
