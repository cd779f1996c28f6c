//! Lenient statistical counts
//!
//! Counts in the published dataset are not always clean integers. Some districts omit a field
//! entirely, some carry `null`, and older exports stored numbers as strings. Every count is
//! normalized to a non-negative integer when the dataset is deserialised, so that the query layer
//! never has to reason about absent or malformed values.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A statistical count. Always non-negative.
pub type Count = u64;

/// Convert an arbitrary JSON value into a [Count].
///
/// * Non-negative integers are taken as-is.
/// * Non-negative finite floats are truncated.
/// * Strings are trimmed and parsed as an integer or float using the rules above.
/// * Anything else (`null`, negative numbers, booleans, arrays, objects, unparseable strings) is 0.
pub fn count_from_value(value: &Value) -> Count {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(count_from_f64))
            .unwrap_or(0),
        Value::String(string) => count_from_str(string),
        _ => 0,
    }
}

fn count_from_str(string: &str) -> Count {
    let string = string.trim();
    string
        .parse::<u64>()
        .ok()
        .or_else(|| string.parse::<f64>().ok().and_then(count_from_f64))
        .unwrap_or(0)
}

fn count_from_f64(value: f64) -> Option<Count> {
    // Saturating float to int conversion.
    (value.is_finite() && value >= 0.0).then_some(value as u64)
}

/// Serde `deserialize_with` function for lenient counts.
///
/// Use together with `#[serde(default)]` so that absent fields also become 0.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Count, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, count_from_value))
}
