//! JSON file sink
//!
//! Writes the result set as a pretty-printed JSON array (2-space indent).
//! Each write goes to a sibling `.tmp` file that is then renamed over the
//! target, so the target is always either the previous or the new snapshot.

use crate::output::traits::{CrawlResult, OutputResult, ResultSink};
use std::fs;
use std::path::{Path, PathBuf};

/// Result sink backed by a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl ResultSink for JsonFileSink {
    fn write_snapshot(&mut self, results: &[CrawlResult]) -> OutputResult<()> {
        let json = serde_json::to_string_pretty(results)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            "Checkpointed {} results to {}",
            results.len(),
            self.path.display()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads a snapshot previously written by [`JsonFileSink`]
///
/// # Arguments
///
/// * `path` - Path to the JSON output file
///
/// # Returns
///
/// * `Ok(Vec<CrawlResult>)` - The results in processing order
/// * `Err(OutputError)` - The file is missing or not a valid snapshot
pub fn load_results(path: &Path) -> OutputResult<Vec<CrawlResult>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
