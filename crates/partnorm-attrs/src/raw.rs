use serde_json::Value;

/// Text form of a raw attribute value as delivered by the marketplace API.
///
/// Strings are taken verbatim, numbers and booleans use their JSON text,
/// `null` is empty and arrays of scalars are joined with `", "`.
pub fn raw_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) => items.iter().map(raw_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// Whether a raw value carries nothing worth keeping.
pub fn is_placeholder_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => matches!(text.trim(), "" | "-"),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
