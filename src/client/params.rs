//! Request parameter helpers.

use serde_json::{Map, Value};

/// Caller-supplied request parameters, as JSON values keyed by name.
pub type Params = Map<String, Value>;

/// Converts a JSON object into [`Params`]; anything else yields an empty set.
pub fn params_from(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

/// Flattens parameters into query-string pairs.
///
/// Strings are sent verbatim, arrays comma-joined, nulls dropped, and other
/// values in their JSON text form.
pub fn query_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(name, value)| query_value(value).map(|v| (name.clone(), v)))
        .collect()
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}
