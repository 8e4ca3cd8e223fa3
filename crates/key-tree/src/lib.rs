//! Key Tree Library
//!
//! Organizes items tagged with hierarchical keys (e.g. `"1.2.3"` or
//! `[1, "intro", true]`) into a single ordered tree.
//!
//! # Core Concepts
//!
//! - **Key**: a non-empty sequence of [`Atom`]s, compared component by component
//! - **KeyNormalizer**: turns raw JSON key values into keys
//! - **TreeBuilder**: the mutable build phase; inserts items and synthesizes dummy nodes
//! - **KeyTree**: the finalized tree with sorted children, sibling links and
//!   flattened descendant listings
//!
//! # Example
//!
//! ```
//! use key_tree::prelude::*;
//! use serde_json::json;
//!
//! let normalizer = KeyNormalizer::default();
//! let mut builder = TreeBuilder::new();
//!
//! for (path, raw) in [("a.txt", json!("1.1")), ("b.txt", json!("1.2")), ("c.txt", json!("2"))] {
//!     if let Some(key) = normalizer.normalize(Some(&raw)).unwrap() {
//!         builder.insert(key, path);
//!     }
//! }
//!
//! let tree = builder.finalize();
//! let keys: Vec<String> = tree
//!     .walk(TraversalOrder::InOrder)
//!     .map(|id| key_tree::join(tree.key_segment(id), "."))
//!     .collect();
//! assert_eq!(keys, ["", "1", "1.1", "1.2", "2"]);
//! ```

mod error;
mod key;
pub mod tree;

pub use error::KeyError;
pub use key::{join, Atom, Key, KeyNormalizer, NormalizeMode};
pub use tree::{
    KeyTree, Node, NodeId, NodeKind, TraversalOrder, Tree, TreeBuilder, TreeTraversal, TreeWalker,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Atom, Key, KeyError, KeyNormalizer, KeyTree, Node, NodeId, NodeKind, TraversalOrder, Tree,
        TreeBuilder, TreeTraversal,
    };
}
