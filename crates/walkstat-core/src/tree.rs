//! Arena-backed asset tree construction and node operations.

use serde::{Deserialize, Serialize};

use crate::config::WalkerDescriptor;
use crate::error::TreeError;
use crate::node::{AssetNode, ChildNodes, NodeId, WalkEntry, WalkerId, WalkerNode};
use crate::segment::segment_units;
use crate::traverse::{Descendants, Files, Subdirectories};

/// Multi-root tree of path segments built from walked file paths.
///
/// The tree owns every node in a single arena; [`NodeId`] values index into
/// it. Construction is append-only: nodes are created once and never removed
/// or mutated afterwards, so a built tree is safe for unlimited concurrent
/// read-only traversal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetTree {
    nodes: Vec<AssetNode>,
    walkers: Vec<WalkerNode>,
}

impl AssetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// All walker roots in registration order.
    pub fn walkers(&self) -> &[WalkerNode] {
        &self.walkers
    }

    /// Get one walker root.
    pub fn walker(&self, id: WalkerId) -> &WalkerNode {
        &self.walkers[id.0]
    }

    /// Get one node by arena id.
    pub fn node(&self, id: NodeId) -> &AssetNode {
        &self.nodes[id.0]
    }

    /// Total number of nodes across all walkers.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Register a new walker root for a descriptor.
    pub fn add_walker(&mut self, descriptor: WalkerDescriptor) -> WalkerId {
        let id = WalkerId::new(self.walkers.len());
        self.walkers.push(WalkerNode::new(descriptor));
        id
    }

    /// Fold one walked file path into the owner walker's subtree.
    ///
    /// Creates one node per path segment not yet present among the sibling
    /// set at that depth and reuses existing nodes otherwise, so repeated
    /// insertion of the same path is idempotent. Only the last segment
    /// receives the terminal entry; terminal status is fixed at creation
    /// time. Returns the node for the full path.
    pub fn consume_asset(&mut self, entry: WalkEntry, owner: WalkerId) -> Result<NodeId, TreeError> {
        let units = segment_units(&self.walkers[owner.0].descriptor, &entry.path)?;
        let terminal_index = units.len() - 1;

        // Nearest ancestor first, grown as we descend.
        let mut ancestors: Vec<NodeId> = Vec::new();
        let mut current: Option<NodeId> = None;

        for (level, unit) in units.iter().enumerate() {
            let siblings = match current {
                Some(parent) => &self.nodes[parent.0].children,
                None => &self.walkers[owner.0].children,
            };
            let id = match self.find_child(siblings, unit) {
                Some(existing) => existing,
                None => {
                    let parent = current;
                    let qualified_path = match parent {
                        Some(p) => self.nodes[p.0].qualified_path.join(unit.as_str()),
                        None => unit.as_str().into(),
                    };
                    let id = NodeId::new(self.nodes.len());
                    self.nodes.push(AssetNode {
                        id,
                        unit: unit.clone(),
                        qualified_path,
                        level: level as u32,
                        parent,
                        ancestors: ancestors.clone(),
                        children: Vec::new(),
                        terminal: (level == terminal_index).then(|| entry.clone()),
                    });
                    match parent {
                        Some(p) => self.nodes[p.0].children.push(id),
                        None => self.walkers[owner.0].children.push(id),
                    }
                    id
                }
            };
            ancestors.insert(0, id);
            current = Some(id);
        }

        current.ok_or_else(|| TreeError::InvalidPath {
            path: entry.path.clone(),
        })
    }

    fn find_child(&self, siblings: &[NodeId], unit: &str) -> Option<NodeId> {
        siblings
            .iter()
            .copied()
            .find(|id| self.nodes[id.0].unit == unit)
    }

    /// Lazy pre-order iterator over every node in the owner's subtree.
    ///
    /// Each call builds a fresh, independent iterator; re-invoking re-walks
    /// the tree with no shared cursor state.
    pub fn descendants<'a>(&'a self, owner: &'a dyn ChildNodes) -> Descendants<'a> {
        Descendants::new(self, owner.child_ids())
    }

    /// Lazy pre-order iterator over directory nodes only.
    ///
    /// With `max_level`, recursion into a node's children happens only while
    /// `node.level <= max_level`. The gate checks the *current* node's
    /// level, so traversal can still descend one level past the ceiling when
    /// the parent sits exactly at the boundary; [`AssetTree::walk_nodes`]
    /// and [`AssetTree::filter_nodes`] gate differently.
    pub fn subdirectories<'a>(
        &'a self,
        owner: &'a dyn ChildNodes,
        max_level: Option<u32>,
    ) -> Subdirectories<'a> {
        Subdirectories::new(self, owner.child_ids(), max_level)
    }

    /// Lazy pre-order iterator over file nodes only, with the same level
    /// gating rule as [`AssetTree::subdirectories`].
    pub fn files<'a>(&'a self, owner: &'a dyn ChildNodes, max_level: Option<u32>) -> Files<'a> {
        Files::new(self, owner.child_ids(), max_level)
    }

    /// Depth-first pre-order visitor walk over a node list.
    ///
    /// The visitor returns `true` to continue; the first `false` stops the
    /// walk immediately and that node is returned. With `max_level`, nodes
    /// above the ceiling are still visited but not recursed into. Returns
    /// `None` when the walk completes.
    pub fn inspect_nodes(
        &self,
        nodes: &[NodeId],
        visitor: &mut dyn FnMut(&AssetNode) -> bool,
        max_level: Option<u32>,
    ) -> Option<NodeId> {
        for &id in nodes {
            let node = &self.nodes[id.0];
            if !visitor(node) {
                return Some(id);
            }
            if max_level.is_some_and(|max| node.level > max) {
                continue;
            }
            if !node.children.is_empty() {
                if let Some(found) = self.inspect_nodes(&node.children, visitor, max_level) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Visitor walk rooted at a walker node or asset node.
    pub fn walk_nodes(
        &self,
        owner: &dyn ChildNodes,
        visitor: &mut dyn FnMut(&AssetNode) -> bool,
        max_level: Option<u32>,
    ) -> Option<NodeId> {
        self.inspect_nodes(owner.child_ids(), visitor, max_level)
    }

    /// Eager pre-order collection of every node matching the predicate.
    ///
    /// Recursion continues into a node's children only if the node itself
    /// passed the predicate. Level gating counts from 0 at the owner's
    /// children and stops recursing past `max_level`.
    pub fn filter_nodes(
        &self,
        owner: &dyn ChildNodes,
        predicate: &dyn Fn(&AssetNode) -> bool,
        max_level: Option<u32>,
    ) -> Vec<NodeId> {
        let mut result = Vec::new();
        self.flat_filter_nodes(owner.child_ids(), predicate, &mut result, 0, max_level);
        result
    }

    fn flat_filter_nodes(
        &self,
        children: &[NodeId],
        predicate: &dyn Fn(&AssetNode) -> bool,
        populate: &mut Vec<NodeId>,
        level: u32,
        max_level: Option<u32>,
    ) {
        let passed: Vec<NodeId> = children
            .iter()
            .copied()
            .filter(|id| predicate(&self.nodes[id.0]))
            .collect();
        populate.extend_from_slice(&passed);
        for id in passed {
            let node = &self.nodes[id.0];
            if max_level.is_none_or(|max| level <= max) && !node.children.is_empty() {
                self.flat_filter_nodes(&node.children, predicate, populate, level + 1, max_level);
            }
        }
    }
}
