use crate::output::traits::{CrawlResult, OutputResult, ResultSink};

/// Append-only, ordered collection of crawl results
///
/// Order is processing order, not discovery order. `persist` always writes
/// the full sequence so the sink holds a complete snapshot after every call.
#[derive(Debug, Default, Clone)]
pub struct ResultStore {
    results: Vec<CrawlResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, result: CrawlResult) {
        self.results.push(result);
    }

    /// All results recorded so far, in processing order
    pub fn snapshot_all(&self) -> &[CrawlResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Writes the complete result set to `sink`, replacing its contents
    pub fn persist(&self, sink: &mut dyn ResultSink) -> OutputResult<()> {
        sink.write_snapshot(&self.results)
    }

    pub fn into_results(self) -> Vec<CrawlResult> {
        self.results
    }
}
