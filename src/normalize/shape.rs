use serde_json::Value;

use super::fields;

/// Input batch shape, resolved once at the normalizer boundary by
/// structural inspection. Downstream walkers stay free of duck-typed
/// branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceShape {
    /// Array of relational records carrying id and parent-reference fields.
    FlatRelational,
    /// Legacy `[label, ...children]` tuples or arrays of arrays.
    NestedTuple,
    /// Object(s) exposing children under an aliased container key.
    ObjectGraph,
}

impl SourceShape {
    pub fn detect(raw: &Value) -> Option<SourceShape> {
        match raw {
            Value::Object(_) => Some(SourceShape::ObjectGraph),
            Value::Array(items) => Some(Self::detect_array(items)),
            _ => None,
        }
    }

    fn detect_array(items: &[Value]) -> SourceShape {
        for item in items {
            match item {
                Value::Object(map) => {
                    if fields::resolve_children(map).is_some() {
                        return SourceShape::ObjectGraph;
                    }
                }
                Value::Array(_) | Value::String(_) => return SourceShape::NestedTuple,
                _ => {}
            }
        }
        // Plain objects and the empty batch both read as flat relational.
        SourceShape::FlatRelational
    }
}
