//! Output module for persisting crawl results
//!
//! This module handles:
//! - The ordered, append-only result store
//! - Result sinks (JSON file on disk, in-memory)
//! - Statistics and the end-of-run report

mod json_output;
mod stats;
mod store;
mod traits;

pub use json_output::{load_results, JsonFileSink};
pub use stats::{print_report, print_results_summary, CrawlReport, CrawlStatistics};
pub use store::ResultStore;
pub use traits::{CrawlResult, MemorySink, OutputError, OutputResult, ResultSink};
