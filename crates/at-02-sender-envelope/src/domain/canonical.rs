//! Canonical JSON.
//!
//! Object keys sorted by byte order at every depth, no insignificant
//! whitespace, strings escaped the way `serde_json` writes them. The output
//! does not depend on the insertion order of any map in the input.

use serde_json::Value;

/// Render `value` in canonical form.
pub fn canonicalize(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut pairs: Vec<_> = map.iter().collect();
            pairs.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));

            out.push('{');
            for (idx, (key, v)) in pairs.into_iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_canonical(v, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (idx, v) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_canonical(v, out);
            }
            out.push(']');
        }
        Value::String(s) => write_string(s, out),
        // Null, Bool and Number have a single compact rendering
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push_str(&Value::String(s.to_owned()).to_string());
}
