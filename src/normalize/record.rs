use serde::Serialize;
use serde_json::{Map, Value};

use super::fields;

/// Errors raised while resolving one record's fields. These never fail a
/// batch; the normalizer downgrades them to skip-and-report anomalies.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordFieldError {
    #[error("no usable id field (tried {})", fields::ID_FIELDS.join(", "))]
    MissingId,
    #[error("no resolvable display field (tried {})", fields::LABEL_FIELDS.join(", "))]
    MissingLabel,
}

/// A menu record after field-alias resolution: the fixed attribute set the
/// tree builder consumes. Canonical attributes are rebuilt fresh on every
/// ingestion; nothing here survives a rebuild except by id-keyed merge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub id: String,
    pub name: String,
    pub href: Option<String>,
    /// Weak reference into the same batch; `None` means root.
    pub parent_id: Option<String>,
    /// Sibling rank. Ties are broken by original input order.
    pub order: i64,
    /// Rare source-supplied initial expansion.
    pub expanded_hint: bool,
    /// Active/inactive flag, passed through unchanged.
    pub recstatus: Option<Value>,
    /// Original input position; tie-break and diagnostics only.
    pub seq: usize,
}

impl CanonicalRecord {
    /// Resolve a flat relational record. Id and label are mandatory here:
    /// a relational row with neither is unrecoverable.
    pub fn from_flat(map: &Map<String, Value>, seq: usize) -> Result<Self, RecordFieldError> {
        let id = fields::resolve(map, fields::ID_FIELDS)
            .and_then(fields::as_id_string)
            .ok_or(RecordFieldError::MissingId)?;
        let name = fields::resolve(map, fields::LABEL_FIELDS)
            .and_then(fields::as_label)
            .ok_or(RecordFieldError::MissingLabel)?;

        Ok(Self {
            id,
            name,
            href: Self::resolve_href(map),
            parent_id: fields::resolve(map, fields::PARENT_FIELDS).and_then(fields::as_parent_id),
            order: Self::resolve_order(map).unwrap_or(0),
            expanded_hint: Self::resolve_expanded_hint(map),
            recstatus: Self::resolve_recstatus(map),
            seq,
        })
    }

    /// Resolve an object-graph node. Structure comes from containment, so
    /// the parent is supplied by the walker, a missing id falls back to the
    /// synthesized label path, and a missing order falls back to the node's
    /// position within its container.
    pub fn from_object(
        map: &Map<String, Value>,
        seq: usize,
        path_id: &str,
        parent_id: Option<String>,
        position: usize,
    ) -> Result<Self, RecordFieldError> {
        let name = fields::resolve(map, fields::LABEL_FIELDS)
            .and_then(fields::as_label)
            .ok_or(RecordFieldError::MissingLabel)?;
        let id = fields::resolve(map, fields::ID_FIELDS)
            .and_then(fields::as_id_string)
            .unwrap_or_else(|| path_id.to_string());

        Ok(Self {
            id,
            name,
            href: Self::resolve_href(map),
            parent_id,
            order: Self::resolve_order(map).unwrap_or(position as i64),
            expanded_hint: Self::resolve_expanded_hint(map),
            recstatus: Self::resolve_recstatus(map),
            seq,
        })
    }

    /// A bare string inside a legacy container is a leaf.
    pub fn from_leaf_label(
        name: String,
        seq: usize,
        path_id: String,
        parent_id: Option<String>,
        position: usize,
    ) -> Self {
        Self {
            id: path_id,
            name,
            href: None,
            parent_id,
            order: position as i64,
            expanded_hint: false,
            recstatus: None,
            seq,
        }
    }

    fn resolve_href(map: &Map<String, Value>) -> Option<String> {
        fields::resolve(map, fields::HREF_FIELDS).and_then(fields::as_label)
    }

    fn resolve_order(map: &Map<String, Value>) -> Option<i64> {
        fields::resolve(map, fields::ORDER_FIELDS).and_then(fields::as_order)
    }

    fn resolve_expanded_hint(map: &Map<String, Value>) -> bool {
        fields::resolve(map, fields::EXPANDED_FIELDS)
            .map(fields::as_expanded_hint)
            .unwrap_or(false)
    }

    fn resolve_recstatus(map: &Map<String, Value>) -> Option<Value> {
        fields::resolve(map, fields::RECSTATUS_FIELDS).cloned()
    }
}
