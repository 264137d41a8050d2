//! Output sink traits and types
//!
//! This module defines the record written for every crawled page and the
//! trait interface for anything that can hold a snapshot of those records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One crawled page: its normalized URL and the extracted text
///
/// Serialized as `{"url": ..., "html": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub url: String,
    pub html: String,
}

impl CrawlResult {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// Trait for result sink implementations
///
/// Every call receives the complete ordered result set and replaces whatever
/// the sink held before. Sinks never see diffs.
pub trait ResultSink {
    /// Overwrites the sink with `results`
    fn write_snapshot(&mut self, results: &[CrawlResult]) -> OutputResult<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// A sink that keeps every snapshot in memory
///
/// Useful for inspecting the checkpoint history of a crawl.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub snapshots: Vec<Vec<CrawlResult>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent snapshot, or None if nothing was written yet
    pub fn latest(&self) -> Option<&[CrawlResult]> {
        self.snapshots.last().map(|s| s.as_slice())
    }
}

impl ResultSink for MemorySink {
    fn write_snapshot(&mut self, results: &[CrawlResult]) -> OutputResult<()> {
        self.snapshots.push(results.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_result_serializes_with_html_key() {
        let result = CrawlResult::new("https://x.test/a", "hi");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "https://x.test/a", "html": "hi"})
        );
    }

    #[test]
    fn test_memory_sink_keeps_history() {
        let mut sink = MemorySink::new();
        assert!(sink.latest().is_none());

        let first = vec![CrawlResult::new("https://x.test/a", "hi")];
        sink.write_snapshot(&first).unwrap();

        let mut second = first.clone();
        second.push(CrawlResult::new("https://x.test/b", "bye"));
        sink.write_snapshot(&second).unwrap();

        assert_eq!(sink.snapshots.len(), 2);
        assert_eq!(sink.latest().unwrap(), second.as_slice());
        assert_eq!(sink.snapshots[0], first);
    }
}
