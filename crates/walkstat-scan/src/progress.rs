//! Walk progress reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Progress snapshot broadcast during a walk.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Files consumed into the tree so far.
    pub files_consumed: u64,
    /// Nodes in the tree so far (all walkers).
    pub nodes_total: u64,
    /// Path of the most recently consumed entry.
    pub current_path: PathBuf,
    /// Warnings recorded so far for this walk.
    pub warnings_count: u64,
    /// Time elapsed since the walk started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_consumed: 0,
            nodes_total: 0,
            current_path: PathBuf::new(),
            warnings_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Consumption rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_consumed as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}
