//! `api` URL-prefix rewriting.
//!
//! Walks a document and points every string-valued `api` field at the relay:
//! an existing `?url=` wrapper is unwrapped first, then the new prefix is
//! prepended unless already present. Everything else is copied unchanged.

use serde_json::{Map, Value};

const API_KEY: &str = "api";
const URL_MARKER: &str = "?url=";

/// Return a copy of `value` with every `api` string routed through `prefix`.
pub fn rewrite_prefix(value: &Value, prefix: &str) -> Value {
    match value {
        Value::Object(fields) => {
            let mut out = Map::with_capacity(fields.len());
            for (key, field) in fields {
                let rewritten = match field {
                    Value::String(api) if key == API_KEY => Value::String(rewrite_api(api, prefix)),
                    other => rewrite_prefix(other, prefix),
                };
                out.insert(key.clone(), rewritten);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(|item| rewrite_prefix(item, prefix)).collect()),
        scalar => scalar.clone(),
    }
}

fn rewrite_api(api: &str, prefix: &str) -> String {
    let inner = match api.rfind(URL_MARKER) {
        Some(idx) => &api[idx + URL_MARKER.len()..],
        None => api,
    };
    if inner.starts_with(prefix) {
        inner.to_string()
    } else {
        format!("{prefix}{inner}")
    }
}
