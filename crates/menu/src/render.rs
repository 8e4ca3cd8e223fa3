//! Plain-text renderings of a finished menu tree
//!
//! Every node is described as `<key> - <item path>`, with `dummy` standing in
//! for nodes no item was supplied for.

use crate::collection::Collection;
use key_tree::{join, KeyTree, NodeId, TraversalOrder, Tree, TreeTraversal};

fn key_of(tree: &KeyTree<String>, id: NodeId) -> String {
    join(tree.key_segment(id), ".")
}

fn target_of<'a>(tree: &'a KeyTree<String>, id: NodeId, dummy: &'a str) -> &'a str {
    tree.payload(id).map(String::as_str).unwrap_or(dummy)
}

/// `<key> - <path>` for a single node
pub fn describe(tree: &KeyTree<String>, id: NodeId) -> String {
    format!("{} - {}", key_of(tree, id), target_of(tree, id, "dummy"))
}

/// The trail from the top level down to `id`, e.g. `>> 1 - dummy >> 1.2 - b.txt`
pub fn breadcrumbs(tree: &KeyTree<String>, id: NodeId) -> String {
    let mut trail: Vec<String> = tree
        .ancestors(id)
        .into_iter()
        .filter(|&ancestor| ancestor != tree.root())
        .map(|ancestor| describe(tree, ancestor))
        .collect();
    trail.reverse();
    if id != tree.root() {
        trail.push(describe(tree, id));
    }

    format!(">> {}", trail.join(" >> "))
}

/// One `<key> -> <path>` line per node, from the flattened listing
pub fn sitemap_flat(tree: &KeyTree<String>) -> String {
    tree.children_all()
        .iter()
        .map(|&id| format!("{} -> {}", key_of(tree, id), target_of(tree, id, "dummy node")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per node in key order, indented by depth, showing the last key component
pub fn sitemap_indented(tree: &KeyTree<String>) -> String {
    let mut lines = Vec::new();

    tree.visit_in_order(|id, node| {
        let Some(last) = node.last_component() else {
            return;
        };
        lines.push(format!(
            "{}{} -> {}",
            "  ".repeat(node.depth() - 1),
            last,
            target_of(tree, id, "dummy node")
        ));
    });

    lines.join("\n")
}

/// The parent of `id` (unless it is the root), `id` itself, and its children
pub fn local_menu(tree: &KeyTree<String>, id: NodeId) -> String {
    let mut lines = vec!["# local menu".to_string()];

    if let Some(parent) = tree.parent(id).filter(|&parent| parent != tree.root()) {
        lines.push(describe(tree, parent));
    }
    lines.push(format!("{} (current)", describe(tree, id)));
    lines.extend(tree.children(id).iter().map(|&child| describe(tree, child)));

    lines.join("\n")
}

/// The first two levels of the tree
pub fn global_menu(tree: &KeyTree<String>) -> String {
    let mut lines = vec!["# global menu".to_string()];

    for &top in tree.children(tree.root()) {
        let children: Vec<String> = tree
            .children(top)
            .iter()
            .map(|&child| describe(tree, child))
            .collect();
        lines.push(format!("{} {{ {} }}", describe(tree, top), children.join(", ")));
    }

    lines.join("\n")
}

/// Every item's contents in key order, each under a `# <key> - <path>` heading
pub fn merged(tree: &KeyTree<String>, collection: &Collection) -> String {
    let mut sections = Vec::new();

    for id in tree.walk(TraversalOrder::InOrder).skip(1) {
        sections.push(format!("# {}", describe(tree, id)));
        let contents = tree
            .payload(id)
            .and_then(|path| collection.get(path))
            .map(|item| item.contents.as_str())
            .unwrap_or("");
        sections.push(contents.to_string());
    }

    sections.join("\n")
}
