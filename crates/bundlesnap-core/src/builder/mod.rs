//! Object snapshot builder.
//!
//! Produces one JSON document per object:
//!
//! ```text
//! {
//!   "metadata": {"path_id", "class_id", "type", "byte_start", "byte_size"},
//!   "data": <normalized property tree>,
//!   ...type-specific extras
//! }
//! ```
//!
//! A parse failure does not drop the object: `data` becomes an error
//! placeholder and the failure is reported alongside the document.
//! Mesh objects gain `_geometry_info` and `_mesh_data`; materials gain
//! `_color`, `_colors`, `_floats` and `_textures` when present.

pub mod material;
pub mod mesh;

use serde_json::Value;

use crate::errors::ExError;
use crate::library::{AssetFile, ObjectInfo};
use crate::normalize::normalize;
use crate::tree::{Mapping, Node};
use crate::version::EngineVersion;

pub use material::{MaterialProperties, Rgba, TextureBinding};

/// Type name of mesh objects
pub const MESH_TYPE: &str = "Mesh";
/// Type name of material objects
pub const MATERIAL_TYPE: &str = "Material";

/// A built object document plus whatever went wrong while building it
#[derive(Debug, Clone)]
pub struct ObjectSnapshot {
    pub document: Value,
    pub issues: Vec<ExError>,
}

impl ObjectSnapshot {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// The `metadata` block of an object document
pub fn metadata(object: &ObjectInfo) -> Node {
    Node::mapping([
        ("path_id", Node::Id(object.path_id)),
        ("class_id", Node::Int(i64::from(object.class_id))),
        ("type", Node::from(object.type_name.as_str())),
        ("byte_start", Node::UInt(object.byte_start)),
        ("byte_size", Node::UInt(object.byte_size)),
    ])
}

/// Build the snapshot document of one object.
///
/// Never fails. Parse and decode failures are folded into the document and
/// listed in [`ObjectSnapshot::issues`].
pub fn build_object_snapshot<F>(
    file: &F,
    object: &ObjectInfo,
    version: EngineVersion,
) -> ObjectSnapshot
where
    F: AssetFile + ?Sized,
{
    let mut issues = Vec::new();

    let tree = match file.read_tree(object) {
        Ok(tree) => Some(tree),
        Err(err) => {
            tracing::debug!(
                path_id = %object.path_id,
                r#type = %object.type_name,
                error = %err,
                "Object parse failed, writing placeholder"
            );
            issues.push(ExError::from(err).with_path_id(object.path_id));
            None
        }
    };

    let data = match &tree {
        Some(tree) => tree.clone(),
        None => parse_error_placeholder(object, issues.last()),
    };

    let mut doc = Mapping::new();
    doc.insert("metadata".to_string(), metadata(object));
    doc.insert("data".to_string(), data);

    match object.type_name.as_str() {
        MESH_TYPE => {
            if let Some(info) = tree.as_ref().and_then(mesh::geometry_info) {
                doc.insert("_geometry_info".to_string(), info);
            }
            let decoded = file.decode_mesh(object, version);
            if let Err(err) = &decoded {
                issues.push(ExError::from(err.clone()).with_path_id(object.path_id));
            }
            doc.insert("_mesh_data".to_string(), mesh::mesh_data(decoded));
        }
        MATERIAL_TYPE => {
            if let Some(tree) = &tree {
                for (key, value) in MaterialProperties::from_tree(tree).into_fields() {
                    doc.insert(key, value);
                }
            }
        }
        _ => {}
    }

    ObjectSnapshot {
        document: normalize(&Node::Mapping(doc)),
        issues,
    }
}

fn parse_error_placeholder(object: &ObjectInfo, err: Option<&ExError>) -> Node {
    let reason = err.map(ExError::message).unwrap_or_default();
    Node::mapping([
        ("_error", Node::String(format!("Failed to parse: {}", reason))),
        ("_type", Node::from(object.type_name.as_str())),
    ])
}
