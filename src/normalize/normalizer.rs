use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::anomaly::Anomaly;
use crate::config;

use super::fields;
use super::record::CanonicalRecord;
use super::shape::SourceShape;

/// Result of one normalization run: the canonical records that survived,
/// plus everything that had to be skipped, re-keyed or truncated along
/// the way. Ingestion never fails a batch outright.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOutcome {
    pub records: Vec<CanonicalRecord>,
    pub anomalies: Vec<Anomaly>,
}

/// Converts one raw batch into canonical records.
///
/// The shape is resolved once up front; the three walkers share the id
/// disambiguator and the anomaly sink so a mixed batch still comes out as
/// a single consistent sequence.
pub struct Normalizer {
    records: Vec<CanonicalRecord>,
    anomalies: Vec<Anomaly>,
    seen: HashMap<String, usize>,
    next_seq: usize,
    max_nested_depth: u32,
}

impl Normalizer {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            anomalies: Vec::new(),
            seen: HashMap::new(),
            next_seq: 0,
            max_nested_depth: config::CONFIG.limits.max_nested_depth,
        }
    }

    pub fn normalize(raw: &Value) -> NormalizeOutcome {
        let mut normalizer = Self::new();

        match (SourceShape::detect(raw), raw) {
            (Some(SourceShape::FlatRelational), Value::Array(items)) => {
                normalizer.walk_flat(items);
            }
            (Some(SourceShape::NestedTuple), Value::Array(items)) => {
                for (position, item) in items.iter().enumerate() {
                    normalizer.walk_legacy(item, None, "", 0, position);
                }
            }
            (Some(SourceShape::ObjectGraph), Value::Array(items)) => {
                for (position, item) in items.iter().enumerate() {
                    normalizer.walk_graph(item, None, "", 0, position);
                }
            }
            (Some(SourceShape::ObjectGraph), _) => {
                normalizer.walk_graph(raw, None, "", 0, 0);
            }
            _ => {
                normalizer.anomalies.push(Anomaly::UnrecognizedShape {
                    reason: format!("expected array or object, got {}", type_name(raw)),
                });
            }
        }

        normalizer.truncate_to_cap();
        normalizer.finish()
    }

    // ========================================
    // Walkers, one per source shape
    // ========================================

    fn walk_flat(&mut self, items: &[Value]) {
        for (index, item) in items.iter().enumerate() {
            let seq = self.take_seq();
            match item {
                Value::Object(map) => match CanonicalRecord::from_flat(map, seq) {
                    Ok(record) => {
                        self.push(record);
                    }
                    Err(e) => {
                        self.anomalies
                            .push(Anomaly::MalformedRecord { index, reason: e.to_string() });
                    }
                },
                Value::Null => {}
                other => {
                    self.anomalies.push(Anomaly::MalformedRecord {
                        index,
                        reason: format!("expected a relational record object, got {}", type_name(other)),
                    });
                }
            }
        }
    }

    /// Legacy `[label, ...children]` tuples, arrays of arrays, and bare
    /// string leaves.
    fn walk_legacy(
        &mut self,
        value: &Value,
        parent_id: Option<&str>,
        parent_path: &str,
        depth: u32,
        position: usize,
    ) {
        if self.depth_exceeded(depth, parent_path) {
            return;
        }

        let seq = self.take_seq();
        match value {
            Value::String(label) if !fields::is_nullish(label) => {
                let path_id = join_path(parent_path, label);
                self.push(CanonicalRecord::from_leaf_label(
                    label.clone(),
                    seq,
                    path_id,
                    parent_id.map(str::to_string),
                    position,
                ));
            }
            Value::Array(entries) => {
                match entries.first() {
                    Some(Value::String(label)) if !fields::is_nullish(label) => {
                        let path_id = join_path(parent_path, label);
                        let record = CanonicalRecord::from_leaf_label(
                            label.clone(),
                            seq,
                            path_id.clone(),
                            parent_id.map(str::to_string),
                            position,
                        );
                        let assigned = self.push(record);
                        for (child_position, child) in entries[1..].iter().enumerate() {
                            self.walk_legacy(
                                child,
                                Some(&assigned),
                                &path_id,
                                depth + 1,
                                child_position,
                            );
                        }
                    }
                    Some(_) => {
                        // Array of arrays: a grouping level with no node of its own.
                        for (child_position, child) in entries.iter().enumerate() {
                            self.walk_legacy(child, parent_id, parent_path, depth + 1, child_position);
                        }
                    }
                    None => {
                        self.anomalies.push(Anomaly::MalformedRecord {
                            index: seq,
                            reason: "empty legacy tuple".to_string(),
                        });
                    }
                }
            }
            Value::Object(_) => {
                // Mixed legacy batches sometimes interleave object nodes.
                self.walk_graph_at(value, parent_id, parent_path, depth, position, seq);
            }
            other => {
                self.anomalies.push(Anomaly::MalformedRecord {
                    index: seq,
                    reason: format!("unsupported legacy entry: {}", type_name(other)),
                });
            }
        }
    }

    /// Heterogeneous object graphs with aliased children containers.
    fn walk_graph(
        &mut self,
        value: &Value,
        parent_id: Option<&str>,
        parent_path: &str,
        depth: u32,
        position: usize,
    ) {
        if self.depth_exceeded(depth, parent_path) {
            return;
        }
        let seq = self.take_seq();
        self.walk_graph_at(value, parent_id, parent_path, depth, position, seq);
    }

    fn walk_graph_at(
        &mut self,
        value: &Value,
        parent_id: Option<&str>,
        parent_path: &str,
        depth: u32,
        position: usize,
        seq: usize,
    ) {
        match value {
            Value::Object(map) => {
                self.walk_graph_object(map, parent_id, parent_path, depth, position, seq);
            }
            Value::String(label) if !fields::is_nullish(label) => {
                let path_id = join_path(parent_path, label);
                self.push(CanonicalRecord::from_leaf_label(
                    label.clone(),
                    seq,
                    path_id,
                    parent_id.map(str::to_string),
                    position,
                ));
            }
            Value::Array(_) => {
                // Tuple children inside an object graph fall back to the
                // legacy walker under the same parent.
                self.walk_legacy(value, parent_id, parent_path, depth, position);
            }
            Value::Null => {}
            other => {
                self.anomalies.push(Anomaly::MalformedRecord {
                    index: seq,
                    reason: format!("unsupported graph entry: {}", type_name(other)),
                });
            }
        }
    }

    fn walk_graph_object(
        &mut self,
        map: &Map<String, Value>,
        parent_id: Option<&str>,
        parent_path: &str,
        depth: u32,
        position: usize,
        seq: usize,
    ) {
        let path_id = match fields::resolve(map, fields::LABEL_FIELDS).and_then(fields::as_label) {
            Some(name) => join_path(parent_path, &name),
            None => {
                self.anomalies.push(Anomaly::MalformedRecord {
                    index: seq,
                    reason: "no resolvable display field".to_string(),
                });
                return;
            }
        };

        let record = match CanonicalRecord::from_object(
            map,
            seq,
            &path_id,
            parent_id.map(str::to_string),
            position,
        ) {
            Ok(record) => record,
            Err(e) => {
                self.anomalies.push(Anomaly::MalformedRecord { index: seq, reason: e.to_string() });
                return;
            }
        };
        let assigned = self.push(record);

        if let Some(children) = fields::resolve_children(map) {
            for (child_position, child) in children.iter().enumerate() {
                self.walk_graph(child, Some(&assigned), &path_id, depth + 1, child_position);
            }
        }
    }

    // ========================================
    // Shared plumbing
    // ========================================

    /// Register a record, deterministically re-keying id collisions.
    /// Returns the id actually assigned so walkers can link children to it.
    fn push(&mut self, mut record: CanonicalRecord) -> String {
        let count = {
            let entry = self.seen.entry(record.id.clone()).or_insert(0);
            *entry += 1;
            *entry
        };

        if count > 1 {
            let mut suffix = count - 1;
            let mut assigned = format!("{}::{}", record.id, suffix);
            // The suffixed key may itself be taken by a literal source id.
            while self.seen.contains_key(&assigned) {
                suffix += 1;
                assigned = format!("{}::{}", record.id, suffix);
            }
            self.seen.insert(assigned.clone(), 1);
            self.anomalies
                .push(Anomaly::IdCollision { id: record.id.clone(), assigned: assigned.clone() });
            record.id = assigned;
        }

        let id = record.id.clone();
        self.records.push(record);
        id
    }

    fn depth_exceeded(&mut self, depth: u32, parent_path: &str) -> bool {
        if depth < self.max_nested_depth {
            return false;
        }
        let context =
            if parent_path.is_empty() { "batch root".to_string() } else { parent_path.to_string() };
        self.anomalies.push(Anomaly::DepthExceeded { context, limit: self.max_nested_depth });
        true
    }

    fn take_seq(&mut self) -> usize {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn truncate_to_cap(&mut self) {
        if let Some(cap) = config::CONFIG.limits.max_batch_records {
            if self.records.len() > cap {
                let dropped = self.records.len() - cap;
                self.records.truncate(cap);
                self.anomalies.push(Anomaly::BatchTruncated { kept: cap, dropped });
            }
        }
    }

    fn finish(self) -> NormalizeOutcome {
        if config::CONFIG.logging.debug_logging {
            tracing::debug!(
                "normalized {} records ({} anomalies)",
                self.records.len(),
                self.anomalies.len()
            );
        }
        NormalizeOutcome { records: self.records, anomalies: self.anomalies }
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
