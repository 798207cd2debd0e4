//! Pure helpers for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// JSON integers are accepted and converted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts an array of strings from `params[name]`.
///
/// Returns `None` if the key is missing, not an array, or holds any
/// non-string element.
pub fn param_string_list(params: &Value, name: &str) -> Option<Vec<String>> {
    params
        .get(name)?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(String::from))
        .collect()
}
