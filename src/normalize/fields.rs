//! Field-alias resolution tables.
//!
//! Backends disagree on field names; each logical attribute is resolved
//! through one prioritized alias list, applied once during normalization,
//! so downstream components only ever see the canonical shape.

use serde_json::{Map, Value};

/// Id aliases. Id-like fields are tried before the generic "key".
pub const ID_FIELDS: &[&str] = &["id", "pk_id", "menuid", "key"];

/// Display-label aliases, in priority order.
pub const LABEL_FIELDS: &[&str] = &["label", "title", "name", "text", "menuLabel"];

/// Parent-reference aliases, in priority order.
pub const PARENT_FIELDS: &[&str] = &["parentmenuid", "parentId", "parentid", "parent"];

/// Navigable-path aliases.
pub const HREF_FIELDS: &[&str] = &["path", "menuPath", "href"];

/// Children-container aliases seen in legacy object graphs.
pub const CHILD_FIELDS: &[&str] = &["children", "items", "nodes", "routes", "menus", "submenus"];

pub const ORDER_FIELDS: &[&str] = &["order"];
pub const EXPANDED_FIELDS: &[&str] = &["expanded"];
pub const RECSTATUS_FIELDS: &[&str] = &["recstatus"];

/// First non-empty, non-"null"-string match wins.
pub fn resolve<'a>(map: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    for key in aliases {
        match map.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) if is_nullish(s) => continue,
            Some(value) => return Some(value),
        }
    }
    None
}

/// First alias whose value is an array, for children containers.
pub fn resolve_children<'a>(map: &'a Map<String, Value>) -> Option<&'a Vec<Value>> {
    for key in CHILD_FIELDS {
        if let Some(Value::Array(items)) = map.get(*key) {
            return Some(items);
        }
    }
    None
}

pub fn is_nullish(s: &str) -> bool {
    s.is_empty() || s.eq_ignore_ascii_case("null") || s.eq_ignore_ascii_case("undefined")
}

/// Canonical string form of an id value. Numeric ids are stringified so
/// `5` and `"5"` collide instead of silently diverging.
pub fn as_id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !is_nullish(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !is_nullish(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parent values `0`, `"0"`, `""`, `"null"`, `"undefined"` mean "no parent".
pub fn as_parent_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.as_i64() == Some(0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if is_nullish(s) || s == "0" => None,
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

pub fn as_order(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn as_expanded_hint(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        _ => false,
    }
}
