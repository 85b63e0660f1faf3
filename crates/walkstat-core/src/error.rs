//! Error and warning types for tree construction and analytics.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by tree construction and node operations.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Path segmentation produced zero units.
    #[error("Cannot segment path into units: {path}")]
    InvalidPath { path: PathBuf },

    /// A file operation was requested on a directory node.
    #[error("Not a file node: {path}")]
    NotAFile { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TreeError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors raised by walk sources while producing entries.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The walk source failed to produce an entry.
    #[error("Walk source failed at {path}: {message}")]
    WalkSource { path: PathBuf, message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a walk-source failure.
    pub fn walk_source(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::WalkSource {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Kind of non-fatal warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// A walk entry could not be segmented and was skipped.
    InvalidPath,
    /// A stat lookup failed during analytics.
    StatError,
    /// Error reading an entry during the walk.
    ReadError,
}

/// Non-fatal warning collected during construction or analytics. Warnings
/// never abort the run; they are the observable record of skipped work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create an invalid-path warning for a skipped walk entry.
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Cannot segment path into units: {}", path.display()),
            path,
            kind: WarningKind::InvalidPath,
        }
    }

    /// Create a stat-failure warning.
    pub fn stat_error(path: impl Into<PathBuf>, error: &TreeError) -> Self {
        let path = path.into();
        Self {
            message: format!("Stat error: {error}"),
            path,
            kind: WarningKind::StatError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_error_io_classification() {
        let err = TreeError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, TreeError::PermissionDenied { .. }));

        let err = TreeError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, TreeError::NotFound { .. }));
    }

    #[test]
    fn test_scan_warning_creation() {
        let warning = ScanWarning::invalid_path("/odd/entry");
        assert_eq!(warning.kind, WarningKind::InvalidPath);
        assert!(warning.message.contains("segment"));

        let stat = ScanWarning::stat_error(
            "/gone.txt",
            &TreeError::NotFound {
                path: "/gone.txt".into(),
            },
        );
        assert_eq!(stat.kind, WarningKind::StatError);
        assert!(stat.message.contains("Stat error"));
    }
}
