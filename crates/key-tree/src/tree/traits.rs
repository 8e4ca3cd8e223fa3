//! Core tree traits for the key tree

use crate::key::Atom;
use crate::tree::{Node, NodeId};
use std::collections::VecDeque;

/// A hierarchical tree of keyed nodes stored in an arena
///
/// Implementations only provide access to the node storage; navigation is
/// derived from the links each [`Node`] carries.
pub trait Tree {
    /// Item data stored at non-dummy nodes
    type Payload;

    /// Get the root node ID (always exists)
    fn root(&self) -> NodeId;

    /// Get a node by its ID
    ///
    /// Returns `None` if the ID is invalid.
    fn get(&self, id: NodeId) -> Option<&Node<Self::Payload>>;

    /// Count total nodes in the tree, root included
    fn node_count(&self) -> usize;

    /// Get the parent of a node
    ///
    /// Returns `None` for the root node and invalid IDs.
    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent())
    }

    /// Direct children of a node
    ///
    /// Returns an empty slice for invalid IDs.
    fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// The key path from the root to this node
    fn key_segment(&self, id: NodeId) -> &[Atom] {
        self.get(id).map(|n| n.key_segment()).unwrap_or(&[])
    }

    fn payload(&self, id: NodeId) -> Option<&Self::Payload> {
        self.get(id).and_then(|n| n.payload())
    }

    /// Check if a node carries no payload
    ///
    /// Returns false for invalid IDs.
    fn is_dummy(&self, id: NodeId) -> bool {
        self.get(id).map(|n| n.is_dummy()).unwrap_or(false)
    }

    /// Get the depth of a node (root = 0)
    ///
    /// Returns 0 for invalid IDs.
    fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            depth += 1;
            current = self.parent(parent_id);
        }
        depth
    }

    /// Count children of a node
    fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Get all ancestors of a node, from parent to root
    ///
    /// Returns an empty vector for the root or invalid IDs.
    fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            ancestors.push(parent_id);
            current = self.parent(parent_id);
        }
        ancestors
    }

    /// Check if a node is an ancestor of another
    fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            current = self.parent(parent_id);
        }
        false
    }
}

/// Traversal order for walking the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Visit every descendant before its ancestors, the start node last
    ///
    /// No order is guaranteed among siblings.
    LeavesFirst,
    /// Visit parent before children, children in ascending key order
    InOrder,
}

/// Extension trait providing tree traversal and search utilities
///
/// This trait is automatically implemented for all types that implement `Tree`.
pub trait TreeTraversal: Tree {
    /// Walk the tree from the root in the specified order
    fn walk(&self, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, self.root(), order)
    }

    /// Walk the tree starting from a specific node
    fn walk_from(&self, start: NodeId, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, start, order)
    }

    /// Call `visit` for every node, leaves first and the root last
    fn visit_leaves_first<F>(&self, mut visit: F)
    where
        F: FnMut(NodeId, &Node<Self::Payload>),
        Self: Sized,
    {
        for id in self.walk(TraversalOrder::LeavesFirst) {
            if let Some(node) = self.get(id) {
                visit(id, node);
            }
        }
    }

    /// Call `visit` for every node in key order, starting with the root
    fn visit_in_order<F>(&self, mut visit: F)
    where
        F: FnMut(NodeId, &Node<Self::Payload>),
        Self: Sized,
    {
        for id in self.walk(TraversalOrder::InOrder) {
            if let Some(node) = self.get(id) {
                visit(id, node);
            }
        }
    }

    /// Find nodes matching a predicate, in key order
    fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Node<Self::Payload>) -> bool,
        Self: Sized,
    {
        self.walk(TraversalOrder::InOrder)
            .filter(|&id| self.get(id).map(&predicate).unwrap_or(false))
            .collect()
    }

    /// Find every node whose key segment equals `key`
    ///
    /// More than one node is returned when items collided on the same key.
    fn find_by_key(&self, key: &[Atom]) -> Vec<NodeId>
    where
        Self: Sized,
    {
        if key.is_empty() {
            return Vec::new();
        }

        let mut level = vec![self.root()];

        for (depth, component) in key.iter().enumerate() {
            level = level
                .into_iter()
                .flat_map(|id| self.children(id).iter().copied())
                .filter(|&id| self.key_segment(id).get(depth) == Some(component))
                .collect();
        }
        level
    }

    /// All non-dummy nodes, in key order
    fn items(&self) -> Vec<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::InOrder)
            .filter(|&id| id != self.root() && !self.is_dummy(id))
            .collect()
    }
}

// Blanket implementation for all Tree types
impl<T: Tree> TreeTraversal for T {}

/// Iterator for traversing a tree in different orders
pub struct TreeWalker<'a, T: Tree + ?Sized> {
    tree: &'a T,
    order: TraversalOrder,
    stack: Vec<NodeId>,
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    /// Create a new tree walker starting from the given node
    pub fn new(tree: &'a T, start: NodeId, order: TraversalOrder) -> Self {
        let stack = match order {
            // Pre-order stack seeded with the start node
            TraversalOrder::InOrder => vec![start],
            // Breadth-first listing; popping from the end yields it reversed
            TraversalOrder::LeavesFirst => {
                let mut listing = Vec::new();
                let mut queue = VecDeque::from([start]);
                while let Some(id) = queue.pop_front() {
                    listing.push(id);
                    queue.extend(tree.children(id).iter().copied());
                }
                listing
            }
        };

        Self { tree, order, stack }
    }
}

impl<'a, T: Tree + ?Sized> Iterator for TreeWalker<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        match self.order {
            TraversalOrder::InOrder => self.next_in_order(),
            TraversalOrder::LeavesFirst => self.stack.pop(),
        }
    }
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    fn next_in_order(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;

        // Add children in reverse order so the smallest is popped next
        for &child in self.tree.children(current).iter().rev() {
            self.stack.push(child);
        }

        Some(current)
    }
}
