//! Ordered prefix tree over multi-component keys
//!
//! Every distinct key prefix becomes exactly one node (or several, when
//! items collide on the same full key). Prefixes nobody supplied an item for
//! are materialized as dummy nodes.

mod builder;
mod key_tree;
mod node;
mod traits;

pub use builder::TreeBuilder;
pub use key_tree::KeyTree;
pub use node::{Node, NodeId, NodeKind};
pub use traits::{TraversalOrder, Tree, TreeTraversal, TreeWalker};
