//! Cache key derivation for match requests.
//!
//! The payload is rendered as canonical JSON (object keys sorted at every
//! level, arrays in request order, non-ASCII left unescaped) and hashed with
//! MD5. The digest is an identity for caching only, not a security boundary.

use serde_json::Value;

/// Returns the 32-char lowercase hex fingerprint of a request payload.
pub fn cache_key(payload: &Value) -> String {
    let mut canonical = String::new();
    write_canonical(payload, &mut canonical);
    format!("{:x}", md5::compute(canonical.as_bytes()))
}

/// Canonical rendering with `", "` and `": "` separators.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_scalar(&Value::String(key.clone()), out);
                out.push_str(": ");
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => write_scalar(scalar, out),
    }
}

fn write_scalar(value: &Value, out: &mut String) {
    // serde_json escapes only quotes, backslashes and control characters.
    out.push_str(&value.to_string());
}
