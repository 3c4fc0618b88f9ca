//! Value normalization.
//!
//! Converts a [`Node`] tree into a JSON-safe `serde_json::Value`:
//!
//! - byte blobs become `{"binary": true, "format": "base64", "size", "data"}`
//! - NaN and ±Infinity become `0.0`
//! - integers under an identifier field name, at any depth, become decimal
//!   strings; so do [`Node::Id`] values regardless of field name
//!
//! The substitution of non-finite floats is lossy. Snapshots are a comparison
//! format and JSON has no spelling for those values.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bundlesnap_core_types::is_identifier_field;
use serde_json::{Map, Number, Value};

use crate::tree::Node;

/// Normalize a tree reached at the document root.
pub fn normalize(node: &Node) -> Value {
    normalize_field(node, None)
}

/// Normalize a node reached under `field`.
///
/// Sequences pass `field` through to every element, so a list of identifiers
/// under `m_PathID` is coerced element-wise.
pub fn normalize_field(node: &Node, field: Option<&str>) -> Value {
    match node {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(*b),
        Node::Int(v) => {
            if field.is_some_and(is_identifier_field) {
                Value::String(v.to_string())
            } else {
                Value::from(*v)
            }
        }
        Node::UInt(v) => {
            if field.is_some_and(is_identifier_field) {
                Value::String(v.to_string())
            } else {
                Value::from(*v)
            }
        }
        Node::Float(v) => float_value(*v),
        Node::String(s) => Value::String(s.clone()),
        Node::Bytes(bytes) => binary_envelope(bytes),
        Node::Sequence(items) => Value::Array(
            items
                .iter()
                .map(|item| normalize_field(item, field))
                .collect(),
        ),
        Node::Mapping(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), normalize_field(value, Some(key))))
                .collect(),
        ),
        Node::Id(id) => Value::String(id.to_string()),
    }
}

fn float_value(v: f64) -> Value {
    let finite = if v.is_finite() { v } else { 0.0 };
    // from_f64 only rejects non-finite input
    Number::from_f64(finite)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn binary_envelope(bytes: &[u8]) -> Value {
    let mut envelope = Map::new();
    envelope.insert("binary".to_string(), Value::Bool(true));
    envelope.insert("format".to_string(), Value::String("base64".to_string()));
    envelope.insert("size".to_string(), Value::from(bytes.len()));
    envelope.insert("data".to_string(), Value::String(STANDARD.encode(bytes)));
    Value::Object(envelope)
}
