//! Argument extraction helpers for tool dispatch.
//!
//! Tool arguments arrive as a `serde_json::Map`; these helpers pull out
//! typed values and produce the right structural-validation errors.

use serde_json::{Map, Value as JsonValue};

use crate::error::{JoplinError, Result};

/// Get a required string argument.
pub fn get_string_arg(args: &Map<String, JsonValue>, name: &str) -> Result<String> {
    args.get(name)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| JoplinError::MissingArg(name.to_string()))
}

/// Get an optional string argument. A JSON `null` counts as absent.
pub fn get_optional_string(args: &Map<String, JsonValue>, name: &str) -> Option<String> {
    args.get(name).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Get an optional boolean argument.
pub fn get_optional_bool(args: &Map<String, JsonValue>, name: &str) -> Option<bool> {
    args.get(name).and_then(|v| v.as_bool())
}

/// Get an optional non-negative integer argument.
///
/// Rejects values that are present but not representable (negative,
/// fractional, or non-numeric) rather than silently ignoring them.
pub fn get_optional_u64(args: &Map<String, JsonValue>, name: &str) -> Result<Option<u64>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| JoplinError::InvalidArg {
            name: name.to_string(),
            reason: "expected a non-negative integer".to_string(),
        }),
    }
}

/// Get an optional array-of-strings argument.
pub fn get_optional_string_array(
    args: &Map<String, JsonValue>,
    name: &str,
) -> Result<Option<Vec<String>>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(|s| s.to_string())
                    .ok_or_else(|| JoplinError::InvalidArg {
                        name: name.to_string(),
                        reason: "expected an array of strings".to_string(),
                    })
            })
            .collect::<Result<Vec<String>>>()
            .map(Some),
        Some(_) => Err(JoplinError::InvalidArg {
            name: name.to_string(),
            reason: "expected an array of strings".to_string(),
        }),
    }
}
