//! Property normalization helpers

use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, NaiveDateTime};

/// Convert a provider timestamp to epoch milliseconds
///
/// Accepts RFC 3339 (`2020-06-15T18:29:03Z`) and zone-less
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS`, the latter read as UTC.
/// Anything else yields `None`.
pub fn get_time(value: Option<&str>) -> Option<i64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.timestamp_millis());
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Keep the scalar (and scalar array) fields of a JSON object
///
/// Nested objects, arrays holding objects, and nulls are dropped. Non-object
/// input yields an empty map.
pub fn convert_properties(value: &JsonValue) -> JsonObject {
    let Some(object) = value.as_object() else {
        return JsonObject::new();
    };

    object
        .iter()
        .filter(|(_, v)| is_flat(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn is_flat(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null | JsonValue::Object(_) => false,
        JsonValue::Array(items) => items.iter().all(is_scalar),
        _ => true,
    }
}

fn is_scalar(value: &JsonValue) -> bool {
    matches!(
        value,
        JsonValue::String(_) | JsonValue::Number(_) | JsonValue::Bool(_)
    )
}
