//! Crawl statistics and run reports
//!
//! This module collects per-run counters while the orchestrator works and
//! renders them for the command line.

use crate::output::traits::CrawlResult;
use crate::state::{PageState, TerminationReason};
use crate::url::LinkDecision;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Counters collected during a single crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Final state of every page popped from the frontier
    pub pages_by_state: HashMap<PageState, u64>,

    /// Anchors with an href seen on navigated pages
    pub links_seen: u64,

    /// Link decisions, keyed by outcome
    pub links_by_decision: HashMap<LinkDecision, u64>,

    /// Number of checkpoints written to the sink
    pub checkpoints: u64,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_page(&mut self, state: PageState) {
        *self.pages_by_state.entry(state).or_insert(0) += 1;
    }

    pub fn record_link(&mut self, decision: LinkDecision) {
        self.links_seen += 1;
        *self.links_by_decision.entry(decision).or_insert(0) += 1;
    }

    pub fn record_checkpoint(&mut self) {
        self.checkpoints += 1;
    }

    pub fn pages_in_state(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }

    pub fn links_with_decision(&self, decision: LinkDecision) -> u64 {
        self.links_by_decision.get(&decision).copied().unwrap_or(0)
    }

    /// Pages popped from the frontier, whatever their outcome
    pub fn pages_visited(&self) -> u64 {
        self.pages_by_state.values().sum()
    }
}

/// Summary of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub termination: TerminationReason,
    pub results: usize,
    pub statistics: CrawlStatistics,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Where the results were persisted
    pub output: String,
}

impl CrawlReport {
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Prints a crawl report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    let stats = &report.statistics;

    println!("=== Crawl Report ===\n");

    println!("Overview:");
    println!("  Termination: {}", report.termination);
    println!("  Results written: {}", report.results);
    println!("  Output: {}", report.output);
    println!("  Started: {}", report.started_at.to_rfc3339());
    println!("  Duration: {:.1}s", report.duration_seconds());
    println!();

    println!("Pages by State:");
    let mut state_counts: Vec<_> = stats.pages_by_state.iter().collect();
    state_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
    for (state, count) in state_counts {
        println!("  {}: {}", state, count);
    }
    println!();

    println!("Links:");
    println!("  Seen: {}", stats.links_seen);
    println!(
        "  Enqueued: {}",
        stats.links_with_decision(LinkDecision::Enqueue)
    );
    println!(
        "  Already seen: {}",
        stats.links_with_decision(LinkDecision::AlreadySeen)
    );
    println!(
        "  Outside pattern: {}",
        stats.links_with_decision(LinkDecision::OutOfPattern)
    );
    println!(
        "  Malformed: {}",
        stats.links_with_decision(LinkDecision::Malformed)
    );
    println!();

    let visited = stats.pages_visited();
    let yield_rate = if visited > 0 {
        (report.results as f64 / visited as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "Yield: {:.1}% ({} / {} visited pages produced content)",
        yield_rate, report.results, visited
    );
}

/// Prints an existing output file's contents in brief
pub fn print_results_summary(output: &str, results: &[CrawlResult]) {
    println!("=== Output Summary ===\n");
    println!("File: {}", output);
    println!("Results: {}", results.len());
    println!();

    for (i, result) in results.iter().enumerate() {
        println!(
            "  {:>4}. {} ({} chars)",
            i + 1,
            result.url,
            result.html.chars().count()
        );
    }
}
