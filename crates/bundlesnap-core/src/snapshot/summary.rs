//! `summary.json` and `textures_index.json`

use bundlesnap_core_types::PathId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::library::ObjectInfo;

/// Identifier → texture path relative to the bundle snapshot directory
pub type TextureIndex = BTreeMap<PathId, String>;

/// One row of the canonical object list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub path_id: PathId,
    pub class_id: i32,
    #[serde(rename = "type")]
    pub type_name: String,
    pub byte_start: u64,
    pub byte_size: u64,
}

impl From<&ObjectInfo> for SummaryEntry {
    fn from(object: &ObjectInfo) -> Self {
        Self {
            path_id: object.path_id,
            class_id: object.class_id,
            type_name: object.type_name.clone(),
            byte_start: object.byte_start,
            byte_size: object.byte_size,
        }
    }
}

/// Object counts and the canonical object order of one bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Summary {
    pub total_objects: usize,
    pub objects_by_type: BTreeMap<String, usize>,
    pub object_list: Vec<SummaryEntry>,
}

impl Summary {
    /// Summarize objects in enumeration order.
    pub fn from_objects<'a, I>(objects: I) -> Self
    where
        I: IntoIterator<Item = &'a ObjectInfo>,
    {
        let mut summary = Summary::default();
        for object in objects {
            *summary
                .objects_by_type
                .entry(object.type_name.clone())
                .or_insert(0) += 1;
            summary.object_list.push(SummaryEntry::from(object));
        }
        summary.total_objects = summary.object_list.len();
        summary
    }

    pub fn count_of(&self, type_name: &str) -> usize {
        self.objects_by_type.get(type_name).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(path_id: i64, type_name: &str) -> ObjectInfo {
        ObjectInfo {
            path_id: PathId::new(path_id),
            class_id: 0,
            type_name: type_name.to_string(),
            byte_start: 0,
            byte_size: 0,
        }
    }

    #[test]
    fn test_counts_and_order() {
        let objects = vec![
            object(3, "Mesh"),
            object(-1, "Material"),
            object(2, "Mesh"),
        ];
        let summary = Summary::from_objects(&objects);
        assert_eq!(summary.total_objects, 3);
        assert_eq!(summary.count_of("Mesh"), 2);
        assert_eq!(summary.count_of("Texture2D"), 0);
        let order: Vec<i64> = summary.object_list.iter().map(|e| e.path_id.get()).collect();
        assert_eq!(order, vec![3, -1, 2]);
    }

    #[test]
    fn test_entry_serializes_type_and_string_id() {
        let summary = Summary::from_objects(&[object(-8911878726397676121, "Mesh")]);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["object_list"][0]["type"], json!("Mesh"));
        assert_eq!(
            value["object_list"][0]["path_id"],
            json!("-8911878726397676121")
        );
    }

    #[test]
    fn test_texture_index_keys_are_strings() {
        let mut index = TextureIndex::new();
        index.insert(PathId::new(-5), "textures/tex_-5.png".to_string());
        let text = serde_json::to_string(&index).unwrap();
        assert_eq!(text, r#"{"-5":"textures/tex_-5.png"}"#);
    }
}
