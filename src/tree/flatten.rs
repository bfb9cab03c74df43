use crate::config;

use super::node::{DisplayRow, MenuNode};

/// Pre-order flatten of the forest for rendering.
///
/// Roots come out in sibling order; a node's children follow it only when
/// the node is expanded, so a collapsed node hides its entire subtree.
/// Depth is computed here, never stored on the node.
pub fn flatten_tree_for_display(tree: &[MenuNode]) -> Vec<DisplayRow<'_>> {
    let mut rows = Vec::new();
    for node in tree {
        emit(node, 0, &mut rows);
    }
    rows
}

fn emit<'a>(node: &'a MenuNode, depth: usize, rows: &mut Vec<DisplayRow<'a>>) {
    rows.push(DisplayRow { node, depth, child_count: node.children.len() });
    if node.expanded {
        for child in &node.children {
            emit(child, depth + 1, rows);
        }
    }
}

/// Root-to-node label path for `id`, regardless of expansion state.
///
/// The lookup is depth-bounded like the validator's walk: entries past the
/// bound are unreachable, so a pathologically deep id comes back empty
/// instead of looping. Unknown ids come back empty too.
pub fn get_breadcrumb(tree: &[MenuNode], id: &str) -> Vec<String> {
    let limit = config::CONFIG.limits.max_walk_depth;
    let mut trail = Vec::new();
    for root in tree {
        if descend(root, id, 0, limit, &mut trail) {
            return trail;
        }
    }
    if !tree.is_empty() && config::CONFIG.logging.debug_logging {
        tracing::debug!("no breadcrumb for id '{}'", id);
    }
    Vec::new()
}

fn descend(node: &MenuNode, id: &str, depth: u32, limit: u32, trail: &mut Vec<String>) -> bool {
    trail.push(node.name.clone());
    if node.id == id {
        return true;
    }
    if depth + 1 < limit {
        for child in &node.children {
            if descend(child, id, depth + 1, limit, trail) {
                return true;
            }
        }
    }
    trail.pop();
    false
}
