use serde_json::Value;

use crate::anomaly::{self, Anomaly};
use crate::tree::{
    build_menu_tree_with_report, toggle_expansion, ExpansionState, MenuNode,
};

/// Stateful seam between the pure engine and the surrounding application.
///
/// The engine rebuilds the whole forest on every refetch; the one thing
/// threaded across those rebuilds is per-node expansion, which this
/// service retains keyed by id. Everything else is recreated fresh.
#[derive(Debug, Default)]
pub struct MenuService {
    expansion: ExpansionState,
    last_anomalies: Vec<Anomaly>,
}

impl MenuService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a fresh raw batch, rebuild the forest and merge retained
    /// expansion state back in. Anomalies are logged and kept for
    /// inspection until the next rebuild.
    pub fn rebuild(&mut self, raw: &Value) -> Vec<MenuNode> {
        let outcome = build_menu_tree_with_report(raw);
        anomaly::log_anomalies(&outcome.anomalies);
        self.last_anomalies = outcome.anomalies;
        self.expansion.apply(&outcome.tree)
    }

    /// Flip one node's expansion and remember the resulting flags so the
    /// next rebuild reproduces them.
    pub fn toggle(&mut self, tree: &[MenuNode], id: &str) -> Vec<MenuNode> {
        let next = toggle_expansion(tree, id);
        self.expansion = ExpansionState::capture(&next);
        next
    }

    /// Data-integrity report from the most recent rebuild. Whether to
    /// surface these to an administrator is the caller's policy.
    pub fn last_anomalies(&self) -> &[Anomaly] {
        &self.last_anomalies
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }
}
