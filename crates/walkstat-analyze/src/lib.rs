//! Per-directory extension analytics for walkstat asset trees.
//!
//! For every directory in a built tree, [`run_extension_analytics`] groups
//! the directory's direct files by filename extension, computes per-group
//! file counts and byte totals, records two gauge observations per group
//! into an injected [`walkstat_metrics::MetricsRegistry`] and emits one
//! 9-column report row per group.
//!
//! ```rust,no_run
//! use walkstat_analyze::{run_extension_analytics, AnalyticsOptions};
//! use walkstat_core::AssetTree;
//! use walkstat_metrics::{MetricsDialect, MetricsRegistry};
//! use walkstat_scan::TreeScanner;
//!
//! # let descriptor = walkstat_core::WalkerDescriptor::builder()
//! #     .identity("content").root("/var/content").root_is_absolute(true)
//! #     .build().unwrap();
//! let mut tree = AssetTree::new();
//! TreeScanner::new().scan(&mut tree, descriptor).unwrap();
//!
//! let mut registry = MetricsRegistry::new();
//! let report = run_extension_analytics(&tree, &mut registry, &AnalyticsOptions::default());
//!
//! for row in &report.rows {
//!     println!("{}: {} x {} ({} bytes)", row.path, row.count, row.extension, row.total_bytes);
//! }
//! println!("{}", registry.export(MetricsDialect::Prometheus).join("\n"));
//! ```

mod extensions;

pub use extensions::{
    file_extension, run_extension_analytics, AnalyticsOptions, AnalyticsOptionsBuilder,
    AnalyticsReport, ExtensionRow, PATH_EXTENSION_HEADERS,
};

// Re-export core types
pub use walkstat_core::{AssetTree, ScanWarning, WarningKind};
