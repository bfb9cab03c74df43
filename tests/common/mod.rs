#![allow(dead_code)]

use std::sync::Once;

use serde_json::{json, Value};

use admin_menu_rust::tree::MenuNode;

static TRACING: Once = Once::new();

/// Install a quiet subscriber once so anomaly warnings don't interleave
/// with test output.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// The flat relational batch most tests build on: one "Admin" root with
/// two children plus a second root, the way the menus endpoint returns it.
pub fn flat_admin_batch() -> Value {
    json!([
        {"id": 1, "label": "Admin", "parentId": null, "order": 0},
        {"id": 2, "label": "Users", "parentId": 1, "order": 0, "path": "/admin/users"},
        {"id": 3, "label": "Roles", "parentId": 1, "order": 1},
        {"id": 4, "label": "Audit", "parentId": 2, "order": 0},
        {"id": 9, "label": "Reports", "parentId": null, "order": 1},
    ])
}

/// A legacy nested/tuple batch of the `[label, ...children]` kind.
pub fn legacy_batch() -> Value {
    json!([
        ["Admin", "Users", ["Roles", "Permissions"]],
        "Reports",
    ])
}

/// A heterogeneous object graph with aliased children containers and
/// inconsistent field names.
pub fn object_graph_batch() -> Value {
    json!([
        {
            "title": "Admin",
            "items": [
                {"name": "Users", "menuPath": "/admin/users"},
                {"text": "Roles", "routes": [{"label": "Permissions"}]},
            ]
        },
        {"label": "Reports"}
    ])
}

pub fn collect_ids(tree: &[MenuNode]) -> Vec<String> {
    let mut ids = Vec::new();
    push_ids(tree, &mut ids);
    ids
}

fn push_ids(nodes: &[MenuNode], ids: &mut Vec<String>) {
    for node in nodes {
        ids.push(node.id.clone());
        push_ids(&node.children, ids);
    }
}

/// Expand every node via repeated persistent toggles.
pub fn expand_all(tree: &[MenuNode]) -> Vec<MenuNode> {
    let mut next = tree.to_vec();
    for id in collect_ids(tree) {
        if admin_menu_rust::tree::find_node(&next, &id).map(|n| n.expanded) == Some(false) {
            next = admin_menu_rust::tree::toggle_expansion(&next, &id);
        }
    }
    next
}
