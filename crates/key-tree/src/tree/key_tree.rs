//! The finalized, read-only key tree

use crate::tree::{Node, NodeId, Tree};

/// A finalized key tree
///
/// Children are sorted by key, siblings are linked, and every node caches the
/// flattened listing of its subtree. The tree can no longer change.
#[derive(Debug, Clone)]
pub struct KeyTree<P> {
    nodes: Vec<Node<P>>,
}

impl<P> KeyTree<P> {
    pub(crate) fn from_nodes(nodes: Vec<Node<P>>) -> Self {
        Self { nodes }
    }

    /// The next sibling in key order
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next())
    }

    /// The previous sibling in key order
    pub fn previous(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.previous())
    }

    /// The root of the tree `id` belongs to, or `None` for an unknown id
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|_| NodeId::ROOT)
    }

    /// Every node below `id` in sorted pre-order, `id` itself excluded
    pub fn descendants_flattened(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .map(|n| n.descendants_flattened())
            .unwrap_or(&[])
    }

    /// Every node of the tree except the root, in sorted pre-order
    pub fn children_all(&self) -> &[NodeId] {
        self.descendants_flattened(NodeId::ROOT)
    }

    /// Iterate over all nodes with their IDs, in arena order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<P>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }

    /// Returns true if nothing but the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl<P> Tree for KeyTree<P> {
    type Payload = P;

    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn get(&self, id: NodeId) -> Option<&Node<P>> {
        self.nodes.get(id.get())
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // Cached by finalization
    fn depth(&self, id: NodeId) -> usize {
        self.get(id).map(|n| n.depth()).unwrap_or(0)
    }
}
