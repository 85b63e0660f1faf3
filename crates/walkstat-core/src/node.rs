//! Asset node and walker node types.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::config::WalkerDescriptor;
use crate::error::TreeError;

/// Arena index of a node within an [`crate::AssetTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId from an arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }
}

/// Index of a walker root within an [`crate::AssetTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalkerId(pub usize);

impl WalkerId {
    /// Create a new WalkerId from an index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }
}

/// One walked filesystem entry, as yielded by a walk source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkEntry {
    /// Full walked path.
    pub path: PathBuf,
    /// Base name of the entry.
    pub name: CompactString,
    /// Whether the entry is a regular file.
    pub is_file: bool,
}

impl WalkEntry {
    /// Create an entry, deriving the base name from the path.
    pub fn new(path: impl Into<PathBuf>, is_file: bool) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .unwrap_or_default();
        Self {
            path,
            name,
            is_file,
        }
    }

    /// Create a regular-file entry.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, true)
    }

    /// Create a directory entry.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::new(path, false)
    }
}

/// Stat result for a terminal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, if available.
    pub modified: Option<SystemTime>,
}

impl From<&std::fs::Metadata> for FileInfo {
    fn from(metadata: &std::fs::Metadata) -> Self {
        Self {
            size: metadata.len(),
            modified: metadata.modified().ok(),
        }
    }
}

/// Access to a node's direct children, shared by walker roots and asset
/// nodes so traversal can start from either.
pub trait ChildNodes {
    /// Arena ids of the direct children, in insertion order.
    fn child_ids(&self) -> &[NodeId];
}

/// One path segment (directory or file terminal) within exactly one
/// walker's tree.
///
/// A node is a directory iff `terminal` is absent. Terminal status is
/// decided when the node is first created; a prefix first seen as a
/// directory never becomes a file later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetNode {
    /// This node's own arena index.
    pub id: NodeId,

    /// Single path-segment name.
    pub unit: CompactString,

    /// Full path from the walker root, ancestors' units joined with the
    /// platform separator.
    pub qualified_path: PathBuf,

    /// Depth from the walker root; the root's direct children are level 0.
    pub level: u32,

    /// Owning parent, absent for root-level nodes.
    pub parent: Option<NodeId>,

    /// Ancestors ordered nearest parent first.
    pub ancestors: Vec<NodeId>,

    /// Direct children in insertion order; unit names unique among siblings.
    pub children: Vec<NodeId>,

    /// Original walk entry, present only on file nodes.
    pub terminal: Option<WalkEntry>,
}

impl AssetNode {
    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.terminal.is_some()
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.terminal.is_none()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Stat the terminal entry on demand. Never cached: each call re-stats
    /// so analytics observes sizes as of lookup time.
    pub fn file_info(&self) -> Result<FileInfo, TreeError> {
        let entry = self.terminal.as_ref().ok_or_else(|| TreeError::NotAFile {
            path: self.qualified_path.clone(),
        })?;
        let metadata =
            std::fs::metadata(&entry.path).map_err(|e| TreeError::io(&entry.path, e))?;
        Ok(FileInfo::from(&metadata))
    }
}

impl ChildNodes for AssetNode {
    fn child_ids(&self) -> &[NodeId] {
        &self.children
    }
}

/// Root of one walker's subtree; owns the descriptor and the top-level
/// children. Has no unit, qualified path or level of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerNode {
    /// The descriptor this tree was built from.
    pub descriptor: WalkerDescriptor,

    /// Root-level children in insertion order.
    pub children: Vec<NodeId>,
}

impl WalkerNode {
    /// Create an empty walker node for a descriptor.
    pub fn new(descriptor: WalkerDescriptor) -> Self {
        Self {
            descriptor,
            children: Vec::new(),
        }
    }

    /// The walker identity, used as the analytics scope label.
    pub fn identity(&self) -> &str {
        &self.descriptor.identity
    }

    /// The walker root path.
    pub fn root(&self) -> &Path {
        &self.descriptor.root
    }
}

impl ChildNodes for WalkerNode {
    fn child_ids(&self) -> &[NodeId] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_walk_entry_derives_name() {
        let entry = WalkEntry::file("/repo/src/main.rs");
        assert_eq!(entry.name.as_str(), "main.rs");
        assert!(entry.is_file);

        let dir = WalkEntry::directory("/repo/src");
        assert_eq!(dir.name.as_str(), "src");
        assert!(!dir.is_file);
    }

    #[test]
    fn test_file_info_from_metadata() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0123456789").unwrap();
        file.flush().unwrap();

        let metadata = std::fs::metadata(file.path()).unwrap();
        let info = FileInfo::from(&metadata);
        assert_eq!(info.size, 10);
        assert!(info.modified.is_some());
    }

    #[test]
    fn test_file_info_on_directory_node_fails() {
        let node = AssetNode {
            id: NodeId::new(0),
            unit: "src".into(),
            qualified_path: "src".into(),
            level: 0,
            parent: None,
            ancestors: Vec::new(),
            children: Vec::new(),
            terminal: None,
        };
        assert!(node.is_dir());
        assert!(matches!(node.file_info(), Err(TreeError::NotAFile { .. })));
    }
}
