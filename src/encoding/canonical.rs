//! Canonical JSON text for delivered documents.
//!
//! Numbers follow the JavaScript rendering: a float with no fractional part
//! inside the safe-integer range is written as an integer, so `1.0` becomes
//! `1` and `-0.0` becomes `0`. Other floats keep `serde_json`'s shortest
//! round-trip form.

use serde_json::{Map, Value};

/// 2^53 - 1, the largest integer every f64 between it and zero represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Compact JSON text of `value` with integral floats written as integers.
pub fn canonical_json(value: &Value) -> String {
    // Serializing a `Value` cannot fail: keys are always strings.
    serde_json::to_string(&normalize(value)).unwrap_or_default()
}

fn normalize(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => Value::from(f as i64),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize(v)))
                .collect::<Map<String, Value>>(),
        ),
        _ => value.clone(),
    }
}
