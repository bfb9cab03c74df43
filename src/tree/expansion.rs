use std::collections::HashMap;

use super::node::MenuNode;

/// Flip the `expanded` flag on the node matching `id`, leaving every other
/// node untouched. Returns a new forest value so prior renders stay valid
/// snapshots; applying the same toggle twice restores the original
/// structure exactly.
pub fn toggle_expansion(tree: &[MenuNode], id: &str) -> Vec<MenuNode> {
    let mut next = tree.to_vec();
    for node in &mut next {
        if flip(node, id) {
            break;
        }
    }
    next
}

fn flip(node: &mut MenuNode, id: &str) -> bool {
    if node.id == id {
        node.expanded = !node.expanded;
        return true;
    }
    for child in &mut node.children {
        if flip(child, id) {
            return true;
        }
    }
    false
}

/// Identity-keyed expansion flags, the only state that survives a rebuild.
///
/// Keys are node ids, so a backend refresh that drops or re-keys a node
/// silently resets that node to its default - disappeared-node state is
/// never carried over onto an unrelated record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpansionState {
    flags: HashMap<String, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every node's current flag.
    pub fn capture(tree: &[MenuNode]) -> Self {
        let mut state = Self::new();
        state.record_all(tree);
        state
    }

    fn record_all(&mut self, nodes: &[MenuNode]) {
        for node in nodes {
            self.flags.insert(node.id.clone(), node.expanded);
            self.record_all(&node.children);
        }
    }

    /// Merge retained flags into a freshly built forest. Ids the tracker
    /// has never seen keep whatever the build gave them (normally false,
    /// occasionally a source-supplied hint).
    pub fn apply(&self, tree: &[MenuNode]) -> Vec<MenuNode> {
        tree.iter().map(|node| self.apply_node(node)).collect()
    }

    fn apply_node(&self, node: &MenuNode) -> MenuNode {
        let mut next = node.clone();
        if let Some(flag) = self.flags.get(&node.id) {
            next.expanded = *flag;
        }
        next.children = self.apply(&node.children);
        next
    }

    /// Track a toggle without holding a tree. Unknown ids start from the
    /// default collapsed state.
    pub fn note_toggle(&mut self, id: &str) {
        let flag = self.flags.entry(id.to_string()).or_insert(false);
        *flag = !*flag;
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
