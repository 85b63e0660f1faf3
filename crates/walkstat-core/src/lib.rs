//! Core asset-tree types and traversal for walkstat.
//!
//! This crate turns a flat sequence of walked file paths into a materialized
//! hierarchical tree of path segments, one tree per configured walker. The
//! tree is arena-backed: an [`AssetTree`] owns every [`AssetNode`] and nodes
//! reference each other by [`NodeId`], so parent and ancestor back-references
//! never form ownership cycles.
//!
//! # Overview
//!
//! - [`WalkerDescriptor`] names one root-path traversal and its
//!   [`WalkOptions`].
//! - [`AssetTree::consume_asset`] folds one walked file path into the tree,
//!   creating a node per path segment and reusing nodes on re-encounter.
//! - [`AssetTree::descendants`], [`AssetTree::subdirectories`] and
//!   [`AssetTree::files`] are restartable lazy pre-order iterators over any
//!   subtree.
//! - [`AssetTree::walk_nodes`] and [`AssetTree::filter_nodes`] provide a
//!   short-circuiting visitor walk and eager predicate collection.
//!
//! # Example
//!
//! ```rust
//! use walkstat_core::{AssetTree, WalkEntry, WalkerDescriptor};
//!
//! let descriptor = WalkerDescriptor::builder()
//!     .identity("repo")
//!     .root("/repo")
//!     .root_is_absolute(true)
//!     .build()
//!     .unwrap();
//!
//! let mut tree = AssetTree::new();
//! let walker = tree.add_walker(descriptor);
//! tree.consume_asset(WalkEntry::file("/repo/src/main.rs"), walker).unwrap();
//!
//! let root = tree.walker(walker);
//! assert_eq!(tree.descendants(root).count(), 2); // "src" + "main.rs"
//! ```

mod config;
mod error;
mod node;
mod segment;
mod traverse;
mod tree;

pub use config::{WalkOptions, WalkOptionsBuilder, WalkerDescriptor, WalkerDescriptorBuilder};
pub use error::{ScanError, ScanWarning, TreeError, WarningKind};
pub use node::{AssetNode, ChildNodes, FileInfo, NodeId, WalkEntry, WalkerId, WalkerNode};
pub use segment::segment_units;
pub use traverse::{Descendants, Files, Subdirectories};
pub use tree::AssetTree;
