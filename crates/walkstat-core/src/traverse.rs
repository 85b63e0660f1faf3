//! Lazy depth-first traversal iterators.
//!
//! All iterators here are pre-order (node before its children), finite and
//! restartable: they borrow the read-only arena and keep their own explicit
//! stack, so multiple traversals can run over the same tree concurrently.

use crate::node::{AssetNode, NodeId};
use crate::tree::AssetTree;

/// Shared explicit-stack walker. `max_level` gates descent into a node's
/// children on the node's own level; yield filtering is the caller's job.
struct StackWalk<'a> {
    tree: &'a AssetTree,
    stack: Vec<std::slice::Iter<'a, NodeId>>,
    max_level: Option<u32>,
}

impl<'a> StackWalk<'a> {
    fn new(tree: &'a AssetTree, roots: &'a [NodeId], max_level: Option<u32>) -> Self {
        Self {
            tree,
            stack: vec![roots.iter()],
            max_level,
        }
    }

    fn next_node(&mut self) -> Option<&'a AssetNode> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(&id) => {
                    let node = self.tree.node(id);
                    let descend = self.max_level.is_none_or(|max| node.level <= max);
                    if descend && !node.children.is_empty() {
                        self.stack.push(node.children.iter());
                    }
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// Pre-order iterator over every node in a subtree.
pub struct Descendants<'a> {
    walk: StackWalk<'a>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(tree: &'a AssetTree, roots: &'a [NodeId]) -> Self {
        Self {
            walk: StackWalk::new(tree, roots, None),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a AssetNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next_node()
    }
}

/// Pre-order iterator over directory nodes only.
///
/// Descent past `max_level` is gated on the current node's level, so one
/// level beyond the ceiling can still be yielded when the parent sits
/// exactly at the boundary. That boundary rule is load-bearing for callers
/// and is kept as-is.
pub struct Subdirectories<'a> {
    walk: StackWalk<'a>,
}

impl<'a> Subdirectories<'a> {
    pub(crate) fn new(tree: &'a AssetTree, roots: &'a [NodeId], max_level: Option<u32>) -> Self {
        Self {
            walk: StackWalk::new(tree, roots, max_level),
        }
    }
}

impl<'a> Iterator for Subdirectories<'a> {
    type Item = &'a AssetNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.walk.next_node()?;
            if node.is_dir() {
                return Some(node);
            }
        }
    }
}

/// Pre-order iterator over file (terminal) nodes only, with the same
/// boundary rule as [`Subdirectories`].
pub struct Files<'a> {
    walk: StackWalk<'a>,
}

impl<'a> Files<'a> {
    pub(crate) fn new(tree: &'a AssetTree, roots: &'a [NodeId], max_level: Option<u32>) -> Self {
        Self {
            walk: StackWalk::new(tree, roots, max_level),
        }
    }
}

impl<'a> Iterator for Files<'a> {
    type Item = &'a AssetNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.walk.next_node()?;
            if node.is_file() {
                return Some(node);
            }
        }
    }
}
