//! Drives a walk source into an asset tree.

use std::time::{Duration, Instant};

use serde_json::json;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use walkstat_core::{
    AssetTree, ScanError, ScanWarning, WalkerDescriptor, WalkerId, WarningKind,
};
use walkstat_metrics::{InstrumentationOptions, Telemetry};

use crate::progress::ScanProgress;
use crate::source::{JwalkSource, WalkSource};

const PROGRESS_INTERVAL: u64 = 1000;

/// Outcome of consuming one walker's entries.
#[derive(Debug)]
pub struct WalkReport {
    /// The walker root registered in the tree.
    pub walker: WalkerId,
    /// Number of file entries folded into the tree.
    pub files_consumed: u64,
    /// Entries skipped without aborting the walk.
    pub warnings: Vec<ScanWarning>,
    /// Wall time of the walk.
    pub duration: Duration,
}

/// Consumes walk sources into an [`AssetTree`], one walker at a time.
///
/// Construction is sequential per walker; the tree itself serializes walker
/// registration through `&mut` access. Progress snapshots are broadcast
/// every 1000 consumed files.
pub struct TreeScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
    telemetry: Telemetry,
}

impl TreeScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self {
            progress_tx,
            telemetry: Telemetry::new(),
        }
    }

    /// Subscribe to progress snapshots.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Timing instruments collected so far, one per completed walk.
    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// Walk the descriptor's root with the default jwalk source.
    pub fn scan(
        &mut self,
        tree: &mut AssetTree,
        descriptor: WalkerDescriptor,
    ) -> Result<WalkReport, ScanError> {
        self.consume_assets(tree, descriptor, &JwalkSource)
    }

    /// Register a walker and fold every file entry from the source into the
    /// tree.
    ///
    /// Entries that fail segmentation are skipped and recorded as warnings;
    /// a walk-source failure propagates, abandoning that walker's
    /// construction while the already-registered walker node remains in the
    /// tree (no rollback).
    pub fn consume_assets<S: WalkSource + ?Sized>(
        &mut self,
        tree: &mut AssetTree,
        descriptor: WalkerDescriptor,
        source: &S,
    ) -> Result<WalkReport, ScanError> {
        let root = descriptor.root.clone();
        let options = descriptor.options.clone();
        let identity = descriptor.identity.clone();

        let pending = self.telemetry.prepare_instrument(
            InstrumentationOptions::named(format!("walk_{identity}"))
                .with_baggage(json!({ "root": root.display().to_string() })),
        );
        let started = Instant::now();

        let walker = tree.add_walker(descriptor);
        let mut warnings: Vec<ScanWarning> = Vec::new();
        let mut files_consumed: u64 = 0;

        debug!(identity = %identity, root = %root.display(), "starting walk");

        for entry in source.walk(&root, &options) {
            let entry = entry?;
            if !entry.is_file {
                continue;
            }
            let entry_path = entry.path.clone();
            match tree.consume_asset(entry, walker) {
                Ok(_) => {
                    files_consumed += 1;
                    if files_consumed % PROGRESS_INTERVAL == 0 {
                        let _ = self.progress_tx.send(ScanProgress {
                            files_consumed,
                            nodes_total: tree.node_count() as u64,
                            current_path: entry_path,
                            warnings_count: warnings.len() as u64,
                            elapsed: started.elapsed(),
                        });
                    }
                }
                Err(err) => {
                    warn!(path = %entry_path.display(), error = %err, "skipping walk entry");
                    warnings.push(ScanWarning::new(
                        entry_path,
                        err.to_string(),
                        WarningKind::InvalidPath,
                    ));
                }
            }
        }

        let instrument = self.telemetry.measure(pending);
        debug!(
            identity = %identity,
            files = files_consumed,
            warnings = warnings.len(),
            elapsed_ms = instrument.duration.as_millis() as u64,
            "walk complete"
        );

        Ok(WalkReport {
            walker,
            files_consumed,
            warnings,
            duration: instrument.duration,
        })
    }
}

impl Default for TreeScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use walkstat_core::{WalkEntry, WalkOptions};

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("src")).unwrap();
        fs::create_dir(root.join("src/nested")).unwrap();
        fs::write(root.join("src/a.rs"), "a").unwrap();
        fs::write(root.join("src/nested/b.rs"), "bb").unwrap();
        fs::write(root.join("README"), "readme").unwrap();
        fs::create_dir(root.join("empty")).unwrap();

        temp
    }

    fn descriptor_for(root: &Path) -> WalkerDescriptor {
        WalkerDescriptor::builder()
            .identity("test")
            .root(root)
            .root_is_absolute(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_scan_builds_tree_from_files_only() {
        let temp = create_test_tree();
        let mut tree = AssetTree::new();
        let mut scanner = TreeScanner::new();

        let report = scanner.scan(&mut tree, descriptor_for(temp.path())).unwrap();
        assert_eq!(report.files_consumed, 3);
        assert!(report.warnings.is_empty());

        let root = tree.walker(report.walker);
        let units: Vec<&str> = tree
            .descendants(root)
            .map(|n| n.unit.as_str())
            .collect();
        // Derived purely from file paths: "empty" never appears.
        assert!(!units.contains(&"empty"));
        assert!(units.contains(&"src"));
        assert!(units.contains(&"nested"));
        assert_eq!(tree.files(root, None).count(), 3);
    }

    #[test]
    fn test_scan_records_telemetry() {
        let temp = create_test_tree();
        let mut tree = AssetTree::new();
        let mut scanner = TreeScanner::new();

        scanner.scan(&mut tree, descriptor_for(temp.path())).unwrap();

        let instruments = scanner.telemetry().instruments();
        assert_eq!(instruments.len(), 1);
        assert_eq!(instruments[0].name, "walk_test");
    }

    struct VecSource(Vec<Result<WalkEntry, ScanError>>);

    impl WalkSource for VecSource {
        fn walk(
            &self,
            _root: &Path,
            _options: &WalkOptions,
        ) -> Box<dyn Iterator<Item = Result<WalkEntry, ScanError>> + Send> {
            let entries: Vec<_> = self
                .0
                .iter()
                .map(|r| match r {
                    Ok(entry) => Ok(entry.clone()),
                    Err(ScanError::WalkSource { path, message }) => {
                        Err(ScanError::walk_source(path.clone(), message.clone()))
                    }
                    Err(_) => unreachable!("test source only carries WalkSource errors"),
                })
                .collect();
            Box::new(entries.into_iter())
        }
    }

    #[test]
    fn test_unsegmentable_entry_is_skipped_with_warning() {
        let mut tree = AssetTree::new();
        let mut scanner = TreeScanner::new();

        let source = VecSource(vec![
            Ok(WalkEntry::file("/repo/src/a.rs")),
            // Equals the root: segments to zero units.
            Ok(WalkEntry::file("/repo")),
            Ok(WalkEntry::file("/repo/b.rs")),
        ]);
        let descriptor = WalkerDescriptor::builder()
            .identity("repo")
            .root("/repo")
            .root_is_absolute(true)
            .build()
            .unwrap();

        let report = scanner.consume_assets(&mut tree, descriptor, &source).unwrap();
        assert_eq!(report.files_consumed, 2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, WarningKind::InvalidPath);
    }

    #[test]
    fn test_walk_source_failure_propagates_and_walker_remains() {
        let mut tree = AssetTree::new();
        let mut scanner = TreeScanner::new();

        let source = VecSource(vec![
            Ok(WalkEntry::file("/repo/a.rs")),
            Err(ScanError::walk_source("/repo/locked", "read failed")),
            Ok(WalkEntry::file("/repo/never.rs")),
        ]);
        let descriptor = WalkerDescriptor::builder()
            .identity("repo")
            .root("/repo")
            .root_is_absolute(true)
            .build()
            .unwrap();

        let err = scanner
            .consume_assets(&mut tree, descriptor, &source)
            .unwrap_err();
        assert!(matches!(err, ScanError::WalkSource { .. }));

        // No rollback: the walker and the nodes consumed before the failure
        // stay in the tree.
        assert_eq!(tree.walkers().len(), 1);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_repeated_scan_of_same_root_is_idempotent() {
        let temp = create_test_tree();
        let mut tree = AssetTree::new();
        let mut scanner = TreeScanner::new();

        let first = scanner.scan(&mut tree, descriptor_for(temp.path())).unwrap();
        let count_after_first = tree.node_count();

        // A second walker over the same root builds its own subtree.
        let second = scanner.scan(&mut tree, descriptor_for(temp.path())).unwrap();
        assert_eq!(first.files_consumed, second.files_consumed);
        assert_eq!(tree.node_count(), count_after_first * 2);
    }
}
