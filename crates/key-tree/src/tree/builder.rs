//! Incremental construction of the key tree and its finalization pass

use crate::key::Key;
use crate::tree::{KeyTree, Node, NodeId, TraversalOrder, Tree, TreeTraversal};
use log::{debug, trace};

/// The mutable build phase of a key tree
///
/// Items are added with [`insert`](TreeBuilder::insert) in any order, then
/// [`finalize`](TreeBuilder::finalize) consumes the builder and produces the
/// read-only [`KeyTree`]. Finalizing twice, or inserting afterwards, does not
/// compile:
///
/// ```compile_fail
/// use key_tree::{Atom, Key, TreeBuilder};
///
/// let mut builder = TreeBuilder::new();
/// builder.insert(Key::new(vec![Atom::Int(1)]).unwrap(), "a");
/// let tree = builder.finalize();
/// builder.insert(Key::new(vec![Atom::Int(2)]).unwrap(), "b");
/// ```
///
/// Children are only sorted by `finalize`, so the builder offers no reads or
/// traversals either:
///
/// ```compile_fail
/// use key_tree::{Atom, Key, TraversalOrder, TreeBuilder, TreeTraversal};
///
/// let mut builder = TreeBuilder::new();
/// builder.insert(Key::new(vec![Atom::Int(1)]).unwrap(), "a");
/// let ids: Vec<_> = builder.walk(TraversalOrder::InOrder).collect();
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder<P> {
    nodes: Vec<Node<P>>,
}

impl<P> Default for TreeBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TreeBuilder<P> {
    /// Create a builder holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
        }
    }

    /// Add an item under `key`, returning the node that now carries it
    ///
    /// Missing intermediate prefixes are created as dummy nodes. A dummy whose
    /// key equals `key` is promoted in place. When a node with this key
    /// already carries an item, a new sibling with the same key is added
    /// instead of merging.
    pub fn insert(&mut self, key: Key, payload: P) -> NodeId {
        let mut current = NodeId::ROOT;

        loop {
            let level = self.nodes[current.get()].key_segment.len();
            let component = &key[level];
            let deeper = key.len() - level > 1;

            let found = self.nodes[current.get()]
                .children
                .iter()
                .copied()
                .find(|child| self.nodes[child.get()].key_segment[level] == *component);

            match found {
                None if deeper => {
                    let segment = key[..=level].to_vec();
                    let dummy = self.attach(current, Node::new(segment, None, Some(current)));
                    trace!("created dummy node {} for {}", dummy, key);
                    current = dummy;
                }
                None => {
                    let node = Node::new(key.into_atoms(), Some(payload), Some(current));
                    return self.attach(current, node);
                }
                Some(child) if deeper => current = child,
                Some(child) => {
                    let node = &mut self.nodes[child.get()];
                    if node.payload.is_none() {
                        node.payload = Some(payload);
                        trace!("promoted dummy node {} for {}", child, key);
                        return child;
                    }

                    debug!("key collision on {}, adding a sibling node", key);
                    let node = Node::new(key.into_atoms(), Some(payload), Some(current));
                    return self.attach(current, node);
                }
            }
        }
    }

    /// Sort every level, link siblings, and cache flattened descendants
    ///
    /// Nodes are processed leaves first, so every child's flattened listing
    /// is complete before its parent's listing is assembled.
    pub fn finalize(mut self) -> KeyTree<P> {
        let order: Vec<NodeId> = self.unsorted().walk(TraversalOrder::LeavesFirst).collect();

        for id in order {
            self.finalize_node(id);
        }

        debug!(
            "finalized key tree with {} nodes",
            self.nodes.len().saturating_sub(1)
        );
        KeyTree::from_nodes(self.nodes)
    }

    fn finalize_node(&mut self, id: NodeId) {
        let depth = self.nodes[id.get()].key_segment.len();
        self.nodes[id.get()].depth = depth;

        if self.nodes[id.get()].children.is_empty() {
            return;
        }

        // Stable sort: colliding siblings keep their insertion order
        let mut children = std::mem::take(&mut self.nodes[id.get()].children);
        let nodes = &self.nodes;
        children.sort_by(|a, b| {
            nodes[a.get()].key_segment[depth].cmp(&nodes[b.get()].key_segment[depth])
        });

        for pair in children.windows(2) {
            self.nodes[pair[0].get()].next = Some(pair[1]);
            self.nodes[pair[1].get()].previous = Some(pair[0]);
        }

        let mut flattened = Vec::new();
        for &child in &children {
            flattened.push(child);
            flattened.extend_from_slice(&self.nodes[child.get()].descendants);
        }

        let node = &mut self.nodes[id.get()];
        node.children = children;
        node.descendants = flattened;
    }

    /// Read access to the nodes with children in insertion order
    fn unsorted(&self) -> Unsorted<'_, P> {
        Unsorted { nodes: &self.nodes }
    }

    fn attach(&mut self, parent: NodeId, node: Node<P>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.get()].children.push(id);
        id
    }
}

struct Unsorted<'a, P> {
    nodes: &'a [Node<P>],
}

impl<P> Tree for Unsorted<'_, P> {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Atom;
    use pretty_assertions::assert_eq;

    fn key(atoms: &[Atom]) -> Key {
        Key::new(atoms.to_vec()).unwrap()
    }

    fn int(value: i64) -> Atom {
        Atom::Int(value)
    }

    #[test]
    fn test_insert_creates_dummy_ancestors() {
        let mut builder = TreeBuilder::new();
        let id = builder.insert(key(&[int(1), int(2), int(3)]), "c");
        let builder = builder.unsorted();

        assert_eq!(builder.node_count(), 4);
        assert_eq!(builder.depth(id), 3);
        assert_eq!(builder.payload(id), Some(&"c"));

        let ancestors = builder.ancestors(id);
        assert_eq!(ancestors.len(), 3);
        assert!(builder.is_dummy(ancestors[0]));
        assert!(builder.is_dummy(ancestors[1]));
        assert_eq!(builder.key_segment(ancestors[0]), &[int(1), int(2)]);
        assert_eq!(builder.key_segment(ancestors[1]), &[int(1)]);
    }

    #[test]
    fn test_insert_reuses_existing_prefix() {
        let mut builder = TreeBuilder::new();
        let a = builder.insert(key(&[int(1), int(1)]), "a");
        let b = builder.insert(key(&[int(1), int(2)]), "b");
        let builder = builder.unsorted();

        assert_eq!(builder.parent(a), builder.parent(b));
        assert_eq!(builder.child_count(NodeId::ROOT), 1);
        assert_eq!(builder.node_count(), 4);
    }

    #[test]
    fn test_dummy_is_promoted_once() {
        let mut builder = TreeBuilder::new();
        let deep = builder.insert(key(&["a".into(), "b".into()]), "deep");
        let dummy = builder.unsorted().parent(deep).unwrap();
        assert!(builder.unsorted().is_dummy(dummy));

        let promoted = builder.insert(key(&["a".into()]), "top");
        assert_eq!(promoted, dummy);
        assert_eq!(builder.unsorted().payload(dummy), Some(&"top"));
        assert_eq!(builder.unsorted().node_count(), 3);

        // a second item on the same key collides instead of replacing
        let collided = builder.insert(key(&["a".into()]), "again");
        assert_ne!(collided, dummy);
        assert_eq!(builder.unsorted().payload(dummy), Some(&"top"));
        assert_eq!(builder.unsorted().child_count(NodeId::ROOT), 2);
    }

    #[test]
    fn test_finalize_sorts_and_links() {
        let mut builder = TreeBuilder::new();
        let c = builder.insert(key(&[int(3)]), "c");
        let a = builder.insert(key(&[int(1)]), "a");
        let b = builder.insert(key(&[int(2)]), "b");

        let tree = builder.finalize();
        assert_eq!(tree.children(NodeId::ROOT), &[a, b, c]);
        assert_eq!(tree.next(a), Some(b));
        assert_eq!(tree.next(c), None);
        assert_eq!(tree.previous(a), None);
        assert_eq!(tree.previous(c), Some(b));
        assert_eq!(tree.children_all(), &[a, b, c]);
    }
}
