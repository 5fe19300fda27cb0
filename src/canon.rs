// Canonical JSON serialization.
// Produces a deterministic byte form of a payload: compact separators, object
// keys sorted at every nesting level. Semantically identical payloads always
// canonicalize to identical bytes, independent of key insertion order.

use serde_json::{Map, Value};

use crate::error::Result;

/// Canonicalize a payload mapping to bytes.
///
/// This is the single source of truth for both cache keys and request
/// signatures: anything hashed by this crate is hashed over these bytes.
pub fn canonical_bytes(payload: &Map<String, Value>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_object(&mut out, payload)?;
    Ok(out)
}

fn write_value(out: &mut Vec<u8>, value: &Value) -> Result<()> {
    match value {
        Value::Object(map) => write_object(out, map),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(out, item)?;
            }
            out.push(b']');
            Ok(())
        }
        // Scalar formatting (numbers, string escaping) is serde_json's.
        scalar => {
            serde_json::to_writer(&mut *out, scalar)?;
            Ok(())
        }
    }
}

fn write_object(out: &mut Vec<u8>, map: &Map<String, Value>) -> Result<()> {
    // serde_json's Map is sorted by default, but sort explicitly so canonical
    // output does not depend on the preserve_order feature.
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort_unstable();

    out.push(b'{');
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        serde_json::to_writer(&mut *out, key)?;
        out.push(b':');
        write_value(out, &map[key.as_str()])?;
    }
    out.push(b'}');
    Ok(())
}
