//! Walk sources and the tree scanner for walkstat.
//!
//! This crate drives an external walk source into a
//! [`walkstat_core::AssetTree`]. The tree builder only ever sees entries
//! through the [`WalkSource`] seam; [`JwalkSource`] is the default,
//! jwalk-backed implementation with deterministic (sorted) entry order.
//!
//! # Example
//!
//! ```rust,no_run
//! use walkstat_core::{AssetTree, WalkerDescriptor};
//! use walkstat_scan::TreeScanner;
//!
//! let descriptor = WalkerDescriptor::builder()
//!     .identity("content")
//!     .root("/var/content")
//!     .root_is_absolute(true)
//!     .build()
//!     .unwrap();
//!
//! let mut tree = AssetTree::new();
//! let mut scanner = TreeScanner::new();
//! let report = scanner.scan(&mut tree, descriptor).unwrap();
//! println!("consumed {} files", report.files_consumed);
//! ```
//!
//! # Progress Monitoring
//!
//! Subscribe to progress snapshots broadcast during a walk:
//!
//! ```rust,no_run
//! use walkstat_scan::TreeScanner;
//!
//! let scanner = TreeScanner::new();
//! let mut progress_rx = scanner.subscribe();
//!
//! // Drain snapshots from another task or after the walk.
//! while let Ok(progress) = progress_rx.try_recv() {
//!     println!("consumed {} files", progress.files_consumed);
//! }
//! ```

mod progress;
mod scanner;
mod source;

pub use progress::ScanProgress;
pub use scanner::{TreeScanner, WalkReport};
pub use source::{JwalkSource, WalkSource};

// Re-export core types for convenience
pub use walkstat_core::{
    AssetTree, ScanError, ScanWarning, WalkEntry, WalkOptions, WalkerDescriptor, WalkerId,
    WarningKind,
};
