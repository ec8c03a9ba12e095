//! Import statistics.
//!
//! A plain accumulator value threaded through the import loop; nothing here
//! is global or shared.

use crate::publish::PublishOutcome;

/// Counters for an import run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    /// Dataset directories fully processed.
    pub directories: usize,
    /// Files that matched an extension and were submitted.
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ImportStats {
    /// Creates a new empty stats tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a publish outcome, incrementing the appropriate counter.
    pub fn record(&mut self, outcome: &PublishOutcome) {
        match outcome {
            PublishOutcome::Success => self.succeeded += 1,
            PublishOutcome::Failure { .. } => self.failed += 1,
        }
        self.total += 1;
    }

    /// Records that one dataset directory has been processed.
    pub fn record_directory(&mut self) {
        self.directories += 1;
    }

    /// Adds the counters of `other` to `self`.
    pub fn merge(&mut self, other: ImportStats) {
        self.directories += other.directories;
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }

    /// Returns true if at least one file failed to import.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
