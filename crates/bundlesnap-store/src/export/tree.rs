//! Export JSON → property tree

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bundlesnap_core::Node;
use serde_json::Value;

/// Marker key for a base64 byte blob
pub const BYTES_MARKER: &str = "$bytes";
/// Marker key for a non-finite float
pub const FLOAT_MARKER: &str = "$float";

/// Convert an exported tree into a [`Node`].
///
/// JSON integers stay integers (signed when they fit, unsigned otherwise)
/// and JSON decimals stay floats.
///
/// # Errors
///
/// A description of the first malformed marker object.
pub fn node_from_export(value: &Value) -> Result<Node, String> {
    Ok(match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(*b),
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Node::Int(v)
            } else if let Some(v) = n.as_u64() {
                Node::UInt(v)
            } else {
                Node::Float(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => Node::String(s.clone()),
        Value::Array(items) => Node::Sequence(
            items
                .iter()
                .map(node_from_export)
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(marker) = map.get(BYTES_MARKER) {
                    return decode_bytes(marker);
                }
                if let Some(marker) = map.get(FLOAT_MARKER) {
                    return decode_float(marker);
                }
            }
            let mut out = bundlesnap_core::Mapping::new();
            for (key, child) in map {
                out.insert(key.clone(), node_from_export(child)?);
            }
            Node::Mapping(out)
        }
    })
}

fn decode_bytes(marker: &Value) -> Result<Node, String> {
    let text = marker
        .as_str()
        .ok_or_else(|| format!("{} must be a base64 string", BYTES_MARKER))?;
    STANDARD
        .decode(text)
        .map(Node::Bytes)
        .map_err(|e| format!("invalid {} payload: {}", BYTES_MARKER, e))
}

fn decode_float(marker: &Value) -> Result<Node, String> {
    match marker.as_str() {
        Some("NaN") => Ok(Node::Float(f64::NAN)),
        Some("Infinity") => Ok(Node::Float(f64::INFINITY)),
        Some("-Infinity") => Ok(Node::Float(f64::NEG_INFINITY)),
        _ => Err(format!(
            "{} must be \"NaN\", \"Infinity\" or \"-Infinity\", got {}",
            FLOAT_MARKER, marker
        )),
    }
}
