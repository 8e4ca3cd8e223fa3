//! The item collection a menu is built from, and the metadata it publishes to

use anyhow::{Context, Result};
use key_tree::{KeyTree, NodeId};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// A single item: free-form fields, text contents, and attached tree nodes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Item {
    /// The item's text
    #[serde(default)]
    pub contents: String,
    /// Every other field, e.g. the raw menu key
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(skip)]
    nodes: BTreeMap<String, NodeId>,
}

impl Item {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            ..Self::default()
        }
    }

    /// Set a field, returning the item for chaining
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The tree node attached under `name` by a menu run
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.nodes.get(name).copied()
    }

    pub(crate) fn attach(&mut self, name: &str, node: NodeId) {
        self.nodes.insert(name.to_string(), node);
    }
}

/// Items keyed by their path
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    items: BTreeMap<String, Item>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object mapping paths to items
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse item collection")
    }

    /// Load a JSON item collection from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid collection in {}", path.display()))
    }

    pub fn insert(&mut self, path: impl Into<String>, item: Item) {
        self.items.insert(path.into(), item);
    }

    pub fn get(&self, path: &str) -> Option<&Item> {
        self.items.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Item> {
        self.items.get_mut(path)
    }

    /// Iterate over items in path order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Item)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(String, Item)> for Collection {
    fn from_iter<I: IntoIterator<Item = (String, Item)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Shared output of menu runs: finished trees by name
#[derive(Debug, Default)]
pub struct Metadata {
    menus: BTreeMap<String, KeyTree<String>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree published under `name`
    pub fn menu(&self, name: &str) -> Option<&KeyTree<String>> {
        self.menus.get(name)
    }

    pub(crate) fn publish(&mut self, name: &str, tree: KeyTree<String>) {
        self.menus.insert(name.to_string(), tree);
    }
}
