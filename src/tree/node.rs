use serde::Serialize;
use serde_json::Value;

use crate::normalize::CanonicalRecord;

/// The canonical menu entity. `children` is always derived by the tree
/// builder, never supplied by input; `expanded` is ephemeral UI state and
/// not part of the structural identity. Depth is computed at flatten time
/// and never stored here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuNode {
    pub id: String,
    pub name: String,
    pub href: Option<String>,
    /// Weak reference to the owning parent; `None` for roots, including
    /// nodes recovered as roots from dangling references.
    pub parent_id: Option<String>,
    pub order: i64,
    pub recstatus: Option<Value>,
    pub expanded: bool,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub(crate) fn from_record(record: CanonicalRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            href: record.href,
            parent_id: record.parent_id,
            order: record.order,
            recstatus: record.recstatus,
            expanded: record.expanded_hint,
            children: Vec::new(),
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// One row of the flattened display, consumed by the sidebar and the
/// admin table renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow<'a> {
    pub node: &'a MenuNode,
    pub depth: usize,
    pub child_count: usize,
}

/// Locate a node by id anywhere in the forest.
pub fn find_node<'a>(tree: &'a [MenuNode], id: &str) -> Option<&'a MenuNode> {
    for node in tree {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}
