//! Success, skip and failure accounting for batch stages

use crate::io::error::TilingError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Result of processing one item that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The item was processed
    Completed,
    /// The item was deliberately left alone
    Skipped {
        /// Why the item was not processed
        reason: String,
    },
}

/// One item that failed during a stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Image, tile or directory that failed
    pub path: PathBuf,
    /// Rendered error message
    pub message: String,
}

/// Outcome counts of one batch stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageSummary {
    /// Stage name used in reports
    pub stage: &'static str,
    /// Items completed
    pub succeeded: usize,
    /// Items intentionally not processed
    pub skipped: usize,
    /// Items that failed, with the reason
    pub failures: Vec<ItemFailure>,
}

impl StageSummary {
    /// Start an empty summary for `stage`
    pub const fn new(stage: &'static str) -> Self {
        Self {
            stage,
            succeeded: 0,
            skipped: 0,
            failures: Vec::new(),
        }
    }

    /// Count a completed item
    pub const fn record_success(&mut self) {
        self.succeeded += 1;
    }

    /// Count a skipped item
    pub const fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Count and log a failed item
    pub fn record_failure(&mut self, path: &Path, error: &TilingError) {
        log::warn!("{} failed for '{}': {error}", self.stage, path.display());
        self.failures.push(ItemFailure {
            path: path.to_path_buf(),
            message: error.to_string(),
        });
    }

    /// Record the outcome of one item, classifying skip errors as skips
    pub fn record(&mut self, path: &Path, outcome: &crate::Result<ItemOutcome>) {
        match outcome {
            Ok(ItemOutcome::Completed) => self.record_success(),
            Ok(ItemOutcome::Skipped { reason }) => {
                log::info!("{} skipped '{}': {reason}", self.stage, path.display());
                self.record_skip();
            }
            Err(e) if e.is_skip() => {
                log::info!("{} skipped '{}': {e}", self.stage, path.display());
                self.record_skip();
            }
            Err(e) => self.record_failure(path, e),
        }
    }

    /// Number of failed items
    pub const fn failed(&self) -> usize {
        self.failures.len()
    }
}

impl fmt::Display for StageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} succeeded, {} skipped, {} failed",
            self.stage,
            self.succeeded,
            self.skipped,
            self.failed()
        )
    }
}

/// Outcome of a whole run, one entry per stage executed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Stage summaries in execution order
    pub stages: Vec<StageSummary>,
}

impl BatchSummary {
    /// Append a finished stage
    pub fn push(&mut self, stage: StageSummary) {
        self.stages.push(stage);
    }

    /// Failed items across all stages
    pub fn failed(&self) -> usize {
        self.stages.iter().map(StageSummary::failed).sum()
    }

    /// Completed items across all stages
    pub fn succeeded(&self) -> usize {
        self.stages.iter().map(|s| s.succeeded).sum()
    }

    /// Skipped items across all stages
    pub fn skipped(&self) -> usize {
        self.stages.iter().map(|s| s.skipped).sum()
    }

    /// Whether the run finished without any failure
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    /// Log one line per stage and a total
    pub fn log_report(&self) {
        for stage in &self.stages {
            log::info!("{stage}");
        }
        for failure in self.stages.iter().flat_map(|s| &s.failures) {
            log::error!("  {}: {}", failure.path.display(), failure.message);
        }
        log::info!(
            "Total: {} succeeded, {} skipped, {} failed",
            self.succeeded(),
            self.skipped(),
            self.failed()
        );
    }
}

impl From<StageSummary> for BatchSummary {
    fn from(stage: StageSummary) -> Self {
        Self {
            stages: vec![stage],
        }
    }
}
