use std::collections::HashMap;

use serde_json::Value;

use crate::anomaly::{self, Anomaly};
use crate::config;
use crate::normalize::{CanonicalRecord, Normalizer};

use super::node::MenuNode;

/// A built forest plus everything noteworthy that happened on the way.
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub tree: Vec<MenuNode>,
    pub anomalies: Vec<Anomaly>,
}

/// Build the canonical menu forest from raw backend records, logging any
/// anomalies the batch produced.
pub fn build_menu_tree(raw: &Value) -> Vec<MenuNode> {
    let outcome = build_menu_tree_with_report(raw);
    anomaly::log_anomalies(&outcome.anomalies);
    outcome.tree
}

/// Like [`build_menu_tree`], but hands the anomaly report to the caller
/// instead of logging it.
pub fn build_menu_tree_with_report(raw: &Value) -> BuildOutcome {
    let normalized = Normalizer::normalize(raw);
    let built = build_forest(normalized.records);

    let mut anomalies = normalized.anomalies;
    anomalies.extend(built.anomalies);
    BuildOutcome { tree: built.tree, anomalies }
}

/// Assemble a forest from canonical records.
///
/// Two passes: the first indexes one node per record, the second links
/// children. The separation is what tolerates out-of-order input - a child
/// appearing before its parent needs no pre-sort.
pub fn build_forest(records: Vec<CanonicalRecord>) -> BuildOutcome {
    let mut anomalies = Vec::new();
    let max_walk_depth = config::CONFIG.limits.max_walk_depth;

    // Pass 1: one node per record, keyed by disambiguated id.
    let mut input_order: Vec<String> = Vec::with_capacity(records.len());
    let mut nodes: HashMap<String, MenuNode> = HashMap::with_capacity(records.len());
    for record in records {
        input_order.push(record.id.clone());
        nodes.insert(record.id.clone(), MenuNode::from_record(record));
    }

    // Pass 2: link children, recovering bad references as roots.
    let mut children_of: HashMap<String, Vec<String>> = HashMap::new();
    let mut root_ids: Vec<String> = Vec::new();
    for id in &input_order {
        let parent_id = nodes.get(id).and_then(|n| n.parent_id.clone());
        match parent_id {
            Some(parent) if parent == *id => {
                // A self-reference is a one-node cycle.
                anomalies.push(Anomaly::CycleRecovered { id: id.clone() });
                demote_to_root(&mut nodes, id);
                root_ids.push(id.clone());
            }
            Some(parent) if nodes.contains_key(&parent) => {
                children_of.entry(parent).or_default().push(id.clone());
            }
            Some(parent) => {
                anomalies.push(Anomaly::DanglingParent { id: id.clone(), parent_id: parent });
                demote_to_root(&mut nodes, id);
                root_ids.push(id.clone());
            }
            None => root_ids.push(id.clone()),
        }
    }

    // Assemble depth-first from the roots.
    let mut tree: Vec<MenuNode> = Vec::with_capacity(root_ids.len());
    for id in &root_ids {
        if let Some(root) = assemble(id, &mut nodes, &children_of, 0, max_walk_depth, &mut anomalies)
        {
            tree.push(root);
        }
    }

    // Records whose parent chain loops back on itself never reach a root;
    // promote the earliest member of each loop and keep going.
    for id in &input_order {
        if !nodes.contains_key(id) {
            continue;
        }
        anomalies.push(Anomaly::CycleRecovered { id: id.clone() });
        demote_to_root(&mut nodes, id);
        if let Some(root) = assemble(id, &mut nodes, &children_of, 0, max_walk_depth, &mut anomalies)
        {
            tree.push(root);
        }
    }

    // Sibling order is a rendering guarantee: stable by rank, with input
    // order breaking ties. Roots get the same treatment.
    tree.sort_by_key(|n| n.order);

    BuildOutcome { tree, anomalies }
}

fn demote_to_root(nodes: &mut HashMap<String, MenuNode>, id: &str) {
    if let Some(node) = nodes.get_mut(id) {
        node.parent_id = None;
    }
}

fn assemble(
    id: &str,
    nodes: &mut HashMap<String, MenuNode>,
    children_of: &HashMap<String, Vec<String>>,
    depth: u32,
    max_depth: u32,
    anomalies: &mut Vec<Anomaly>,
) -> Option<MenuNode> {
    let mut node = nodes.remove(id)?;

    if let Some(child_ids) = children_of.get(id) {
        if depth + 1 >= max_depth {
            // Anything below this point is unrenderable; drop the subtree
            // rather than recurse past the guard.
            let dropped = discard_subtrees(child_ids, nodes, children_of);
            if dropped > 0 {
                anomalies.push(Anomaly::DepthExceeded { context: id.to_string(), limit: max_depth });
            }
        } else {
            for child_id in child_ids {
                if let Some(child) =
                    assemble(child_id, nodes, children_of, depth + 1, max_depth, anomalies)
                {
                    node.children.push(child);
                }
            }
            node.children.sort_by_key(|n| n.order);
        }
    }

    Some(node)
}

/// Remove a set of subtrees from the build map without recursing (the
/// chain being discarded is exactly the kind that blew the depth guard).
fn discard_subtrees(
    ids: &[String],
    nodes: &mut HashMap<String, MenuNode>,
    children_of: &HashMap<String, Vec<String>>,
) -> usize {
    let mut dropped = 0;
    let mut pending: Vec<&String> = ids.iter().collect();
    while let Some(id) = pending.pop() {
        if nodes.remove(id).is_some() {
            dropped += 1;
        }
        if let Some(child_ids) = children_of.get(id) {
            pending.extend(child_ids.iter());
        }
    }
    dropped
}
