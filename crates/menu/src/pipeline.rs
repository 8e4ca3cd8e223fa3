//! Building a menu tree out of an item collection

use crate::collection::{Collection, Metadata};
use crate::error::MenuError;
use crate::options::Options;
use key_tree::{Key, KeyTree, NodeId, Tree, TreeBuilder};
use log::{debug, info, trace};
use serde_json::Value;
use std::collections::BTreeMap;

/// The result of a build: the finished tree and each participating item's node
#[derive(Debug)]
pub struct MenuBuild {
    /// The finalized tree; payloads are item paths
    pub tree: KeyTree<String>,
    /// Item path -> the node carrying that item
    pub nodes: BTreeMap<String, NodeId>,
}

/// Builds menu trees with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Menu {
    options: Options,
}

impl Menu {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Create a menu from JSON options, see [`Options::from_value`]
    pub fn from_value(value: &Value) -> Result<Self, MenuError> {
        Options::from_value(value).map(Self::new)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Build the tree for every selected item of `collection`
    ///
    /// Items rejected by the filter, items without the key field, and items
    /// the key reader skips do not take part. Any key error aborts the build.
    pub fn build(&self, collection: &Collection) -> Result<MenuBuild, MenuError> {
        let options = &self.options;
        let mut builder = TreeBuilder::new();
        let mut nodes = BTreeMap::new();

        for (path, item) in collection.iter() {
            if !options.filter().matches(path) {
                trace!("{} does not match the filter", path);
                continue;
            }

            let Some(raw) = item.field(options.key_field()) else {
                trace!("{} has no {:?} field", path, options.key_field());
                continue;
            };

            let atoms = options
                .key_reader()
                .read_key(raw, item, options)
                .map_err(|error| MenuError::Key {
                    path: path.clone(),
                    error,
                })?;

            let Some(atoms) = atoms else {
                debug!("key reader skipped {}", path);
                continue;
            };

            let key = Key::new(atoms).map_err(|_| MenuError::CustomReaderContractViolation {
                path: path.clone(),
                reason: "the key reader returned an empty key".to_string(),
            })?;

            trace!("inserting {} at {}", path, key);
            let id = builder.insert(key, path.clone());
            nodes.insert(path.clone(), id);
        }

        let tree = builder.finalize();
        info!(
            "built menu with {} items and {} nodes",
            nodes.len(),
            tree.node_count() - 1
        );

        Ok(MenuBuild { tree, nodes })
    }

    /// Build the tree, attach nodes to items, and publish the tree
    ///
    /// Nothing is attached or published when the build fails.
    pub fn run(&self, collection: &mut Collection, metadata: &mut Metadata) -> Result<(), MenuError> {
        let MenuBuild { tree, nodes } = self.build(collection)?;

        if let Some(field) = self.options.node_output_field() {
            for (path, id) in nodes {
                if let Some(item) = collection.get_mut(&path) {
                    item.attach(field, id);
                }
            }
        }

        if let Some(field) = self.options.tree_output_field() {
            debug!("publishing menu as {:?}", field);
            metadata.publish(field, tree);
        }

        Ok(())
    }
}
