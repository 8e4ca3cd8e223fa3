//! Core node types for the key tree

use crate::key::Atom;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a tree
///
/// Internally represented as an index into an arena-based storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node always has ID 0
    pub const ROOT: NodeId = NodeId(0);

    /// Create a new NodeId from a usize
    pub const fn new(id: usize) -> Self {
        NodeId(id)
    }

    /// Get the inner usize value
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// The role a node plays in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The tree root; carries no key and no payload
    Root,
    /// An implied ancestor nobody supplied an item for
    Dummy,
    /// A node carrying an item
    Item,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Root => write!(f, "Root"),
            NodeKind::Dummy => write!(f, "Dummy"),
            NodeKind::Item => write!(f, "Item"),
        }
    }
}

/// A single node in the tree
///
/// Generic over the payload type `P`. Navigation fields (`next`, `previous`,
/// the flattened descendant listing and `depth`) are only meaningful once the
/// tree has been finalized.
#[derive(Debug, Clone)]
pub struct Node<P> {
    pub(crate) key_segment: Vec<Atom>,
    pub(crate) payload: Option<P>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) previous: Option<NodeId>,
    pub(crate) descendants: Vec<NodeId>,
    pub(crate) depth: usize,
}

impl<P> Node<P> {
    pub(crate) fn root() -> Self {
        Self::new(Vec::new(), None, None)
    }

    pub(crate) fn new(key_segment: Vec<Atom>, payload: Option<P>, parent: Option<NodeId>) -> Self {
        Self {
            key_segment,
            payload,
            parent,
            children: Vec::new(),
            next: None,
            previous: None,
            descendants: Vec::new(),
            depth: 0,
        }
    }

    /// The full key path from the root to this node; empty for the root
    pub fn key_segment(&self) -> &[Atom] {
        &self.key_segment
    }

    /// The last component of the key segment, `None` for the root
    pub fn last_component(&self) -> Option<&Atom> {
        self.key_segment.last()
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Returns true if no item was attached to this node
    pub fn is_dummy(&self) -> bool {
        self.payload.is_none()
    }

    pub fn kind(&self) -> NodeKind {
        match (&self.parent, &self.payload) {
            (None, _) => NodeKind::Root,
            (Some(_), None) => NodeKind::Dummy,
            (Some(_), Some(_)) => NodeKind::Item,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children, sorted by key once the tree is finalized
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    /// Every node of this subtree except the node itself, in sorted pre-order
    pub fn descendants_flattened(&self) -> &[NodeId] {
        &self.descendants
    }

    /// Equals the length of the key segment; 0 for the root
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<P: fmt::Display> fmt::Display for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = crate::key::join(&self.key_segment, ".");
        match &self.payload {
            Some(payload) => write!(f, "{} ({}) - {}", key, self.kind(), payload),
            None => write!(f, "{} ({})", key, self.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        assert_eq!(NodeId::ROOT, NodeId(0));
        assert_eq!(NodeId::new(5).get(), 5);
        assert_eq!(NodeId::from(10), NodeId(10));
        assert_eq!(usize::from(NodeId(7)), 7);
        assert_eq!(NodeId(3).to_string(), "NodeId(3)");
    }

    #[test]
    fn test_node_kind() {
        let root: Node<&str> = Node::root();
        assert_eq!(root.kind(), NodeKind::Root);
        assert!(root.key_segment().is_empty());
        assert_eq!(root.last_component(), None);

        let dummy: Node<&str> = Node::new(vec![Atom::Int(1)], None, Some(NodeId::ROOT));
        assert_eq!(dummy.kind(), NodeKind::Dummy);
        assert!(dummy.is_dummy());

        let item = Node::new(vec![Atom::Int(1), "a".into()], Some("a.txt"), Some(NodeId(1)));
        assert_eq!(item.kind(), NodeKind::Item);
        assert!(!item.is_dummy());
        assert_eq!(item.payload(), Some(&"a.txt"));
        assert_eq!(item.last_component(), Some(&Atom::from("a")));
    }

    #[test]
    fn test_node_display() {
        let item = Node::new(vec![Atom::Int(1), Atom::Int(2)], Some("b.txt"), Some(NodeId(1)));
        assert_eq!(item.to_string(), "1.2 (Item) - b.txt");

        let dummy: Node<&str> = Node::new(vec![Atom::Int(1)], None, Some(NodeId::ROOT));
        assert_eq!(dummy.to_string(), "1 (Dummy)");
    }
}
