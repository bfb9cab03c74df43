use crate::config;

use super::node::{find_node, MenuNode};

enum Scan {
    Found,
    Clean,
    DepthExceeded,
}

/// Decide whether re-parenting `node_id` under `candidate_parent_id` keeps
/// the structure a forest.
///
/// `None` (move to root) is always legal. Self-parenting and any candidate
/// inside the node's own descendant subtree are rejected. The descendant
/// walk is depth-bounded; blowing the bound rejects the move rather than
/// trusting data that may already contain an undetected cycle.
pub fn validate_hierarchy(
    tree: &[MenuNode],
    node_id: &str,
    candidate_parent_id: Option<&str>,
) -> bool {
    let Some(candidate) = candidate_parent_id else {
        return true;
    };
    if candidate == node_id {
        return false;
    }
    let Some(node) = find_node(tree, node_id) else {
        // A node that isn't in the tree cannot close a cycle.
        return true;
    };

    match subtree_contains(node, candidate, 0, config::CONFIG.limits.max_walk_depth) {
        Scan::Clean => true,
        Scan::Found => false,
        Scan::DepthExceeded => {
            tracing::warn!(
                "descendant scan for '{}' exceeded depth bound, rejecting re-parent",
                node_id
            );
            false
        }
    }
}

fn subtree_contains(node: &MenuNode, target: &str, depth: u32, limit: u32) -> Scan {
    if depth >= limit {
        return Scan::DepthExceeded;
    }
    for child in &node.children {
        if child.id == target {
            return Scan::Found;
        }
        match subtree_contains(child, target, depth + 1, limit) {
            Scan::Clean => continue,
            other => return other,
        }
    }
    Scan::Clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_menu_tree;
    use serde_json::json;

    fn sample_tree() -> Vec<MenuNode> {
        build_menu_tree(&json!([
            {"id": 1, "label": "Admin", "parentId": null, "order": 0},
            {"id": 2, "label": "Users", "parentId": 1, "order": 0},
            {"id": 3, "label": "Roles", "parentId": 1, "order": 1},
            {"id": 4, "label": "Audit", "parentId": 2, "order": 0},
            {"id": 9, "label": "Reports", "parentId": null, "order": 1},
        ]))
    }

    #[test]
    fn moving_to_root_is_always_legal() {
        let tree = sample_tree();
        assert!(validate_hierarchy(&tree, "1", None));
        assert!(validate_hierarchy(&tree, "4", None));
    }

    #[test]
    fn self_parenting_is_rejected() {
        let tree = sample_tree();
        assert!(!validate_hierarchy(&tree, "1", Some("1")));
    }

    #[test]
    fn descendants_are_rejected_transitively() {
        let tree = sample_tree();
        assert!(!validate_hierarchy(&tree, "1", Some("2")));
        assert!(!validate_hierarchy(&tree, "1", Some("4")));
        assert!(!validate_hierarchy(&tree, "2", Some("4")));
    }

    #[test]
    fn unrelated_targets_are_accepted() {
        let tree = sample_tree();
        assert!(validate_hierarchy(&tree, "2", Some("9")));
        assert!(validate_hierarchy(&tree, "9", Some("4")));
        assert!(validate_hierarchy(&tree, "unknown", Some("1")));
    }
}
