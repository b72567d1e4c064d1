//! Lenient numeric coercion for upstream data.
//!
//! Fundamentals and relative-performance panels arrive from a data-access
//! layer that is not always careful about types: numbers show up as strings,
//! missing values as empty strings, and occasionally as garbage. Anything that
//! cannot be read as a finite number is treated as absent, never as zero.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a JSON value as a finite `f64`.
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// `deserialize_with` adapter for nullable numeric fields.
///
/// Pair it with `#[serde(default)]` so a missing key is also `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}
