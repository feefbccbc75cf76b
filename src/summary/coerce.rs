// Loose JSON value helpers shared by the strict and legacy paths
//
// A value is "falsy" when it is null, false, numeric zero or the empty string.
// Falsy values are treated exactly like absent ones and replaced by defaults.

use serde_json::{Map, Value};

use super::record::{ActionEntry, ActionItem};

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The value under `key` if it is present and truthy
pub fn truthy<'a>(data: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    data.get(key).filter(|v| is_truthy(v))
}

/// Render a scalar as text; containers and null have no text form
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Truthy scalar under `key` rendered as text
pub fn truthy_text(data: &Map<String, Value>, key: &str) -> Option<String> {
    truthy(data, key).and_then(scalar_text)
}

/// Elements of a sequence as strings; null and nested containers are dropped
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    }
}

/// Elements of a sequence as action entries
pub fn action_entries(value: Option<&Value>, default_assignee: &str) -> Vec<ActionEntry> {
    let items = match value {
        Some(Value::Array(items)) => items,
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => {
                Some(ActionEntry::Item(ActionItem::from_map(map, default_assignee)))
            }
            other => scalar_text(other).map(ActionEntry::Text),
        })
        .collect()
}

/// Opaque sequence elements, kept verbatim
pub fn value_list(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}
