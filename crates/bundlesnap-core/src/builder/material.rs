//! Material enrichment from `m_SavedProperties`.
//!
//! Saved-property lists come in two shapes depending on the engine version
//! and the library: a sequence of `[name, value]` pairs (or
//! `{first, second}` mappings), or a plain mapping from name to value. Both
//! are read the same way.

use bundlesnap_core_types::PathId;
use std::collections::BTreeMap;

use crate::tree::Node;

/// Name of the color property surfaced as the top-level `_color` field
pub const MAIN_COLOR: &str = "_Color";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Missing channels default to 1.0.
    fn from_node(node: &Node) -> Self {
        let channel = |key: &str| node.get(key).and_then(Node::as_f64).unwrap_or(1.0);
        Self {
            r: channel("r"),
            g: channel("g"),
            b: channel("b"),
            a: channel("a"),
        }
    }

    fn to_node(self) -> Node {
        Node::mapping([
            ("r", Node::Float(self.r)),
            ("g", Node::Float(self.g)),
            ("b", Node::Float(self.b)),
            ("a", Node::Float(self.a)),
        ])
    }
}

/// A texture-environment binding to a texture object
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBinding {
    pub path_id: PathId,
    pub scale: (f64, f64),
    pub offset: (f64, f64),
}

impl TextureBinding {
    fn to_node(&self) -> Node {
        Node::mapping([
            ("path_id", Node::Id(self.path_id)),
            ("scale", vec2(self.scale)),
            ("offset", vec2(self.offset)),
        ])
    }
}

fn vec2((x, y): (f64, f64)) -> Node {
    Node::mapping([("x", Node::Float(x)), ("y", Node::Float(y))])
}

fn read_vec2(node: Option<&Node>, default: f64) -> (f64, f64) {
    let axis = |key: &str| {
        node.and_then(|n| n.get(key))
            .and_then(Node::as_f64)
            .unwrap_or(default)
    };
    (axis("x"), axis("y"))
}

/// Properties extracted from one material
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaterialProperties {
    pub colors: BTreeMap<String, Rgba>,
    pub floats: BTreeMap<String, f64>,
    pub textures: BTreeMap<String, TextureBinding>,
}

impl MaterialProperties {
    /// Scan a material's raw property tree.
    pub fn from_tree(tree: &Node) -> Self {
        let mut props = MaterialProperties::default();
        let Some(saved) = tree.get("m_SavedProperties") else {
            return props;
        };

        for (name, value) in named_entries(saved.get("m_Colors")) {
            if value.as_mapping().is_some() {
                props.colors.insert(name.to_string(), Rgba::from_node(value));
            }
        }

        for (name, value) in named_entries(saved.get("m_Floats")) {
            if let Some(v) = value.as_f64() {
                props.floats.insert(name.to_string(), v);
            }
        }

        for (name, value) in named_entries(saved.get("m_TexEnvs")) {
            let path_id = value
                .get("m_Texture")
                .and_then(|t| t.get("m_PathID"))
                .and_then(Node::as_path_id);
            match path_id {
                Some(path_id) if !path_id.is_null() => {
                    props.textures.insert(
                        name.to_string(),
                        TextureBinding {
                            path_id,
                            scale: read_vec2(value.get("m_Scale"), 1.0),
                            offset: read_vec2(value.get("m_Offset"), 0.0),
                        },
                    );
                }
                _ => {}
            }
        }

        props
    }

    /// Top-level document fields; empty groups are left out.
    pub fn into_fields(self) -> Vec<(String, Node)> {
        let mut fields = Vec::new();

        if let Some(main) = self.colors.get(MAIN_COLOR) {
            fields.push(("_color".to_string(), main.to_node()));
        }
        if !self.colors.is_empty() {
            let colors = self
                .colors
                .into_iter()
                .map(|(name, rgba)| (name, rgba.to_node()));
            fields.push(("_colors".to_string(), Node::mapping(colors)));
        }
        if !self.floats.is_empty() {
            let floats = self
                .floats
                .into_iter()
                .map(|(name, v)| (name, Node::Float(v)));
            fields.push(("_floats".to_string(), Node::mapping(floats)));
        }
        if !self.textures.is_empty() {
            let textures = self
                .textures
                .iter()
                .map(|(name, binding)| (name.clone(), binding.to_node()));
            fields.push(("_textures".to_string(), Node::mapping(textures)));
        }

        fields
    }
}

/// `(name, value)` pairs of a saved-property list in any accepted shape
fn named_entries(list: Option<&Node>) -> Vec<(&str, &Node)> {
    match list {
        Some(Node::Sequence(items)) => items.iter().filter_map(pair_entry).collect(),
        Some(Node::Mapping(map)) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        _ => Vec::new(),
    }
}

fn pair_entry(item: &Node) -> Option<(&str, &Node)> {
    match item {
        Node::Sequence(pair) if pair.len() == 2 => Some((pair[0].as_str()?, &pair[1])),
        Node::Mapping(_) => Some((item.get("first")?.as_str()?, item.get("second")?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str, value: Node) -> Node {
        Node::Sequence(vec![Node::from(name), value])
    }

    #[test]
    fn test_colors_default_missing_channels() {
        let tree = Node::mapping([(
            "m_SavedProperties",
            Node::mapping([(
                "m_Colors",
                Node::Sequence(vec![pair(
                    "_EmissionColor",
                    Node::mapping([("r", Node::Float(0.5))]),
                )]),
            )]),
        )]);
        let props = MaterialProperties::from_tree(&tree);
        assert_eq!(
            props.colors["_EmissionColor"],
            Rgba {
                r: 0.5,
                g: 1.0,
                b: 1.0,
                a: 1.0
            }
        );
    }

    #[test]
    fn test_floats_keep_numeric_values_only() {
        let tree = Node::mapping([(
            "m_SavedProperties",
            Node::mapping([(
                "m_Floats",
                Node::Sequence(vec![
                    pair("_Glossiness", Node::Float(0.25)),
                    pair("_Mode", Node::Int(2)),
                    pair("_Label", Node::from("opaque")),
                ]),
            )]),
        )]);
        let props = MaterialProperties::from_tree(&tree);
        assert_eq!(props.floats.len(), 2);
        assert_eq!(props.floats["_Mode"], 2.0);
    }

    #[test]
    fn test_texenvs_skip_null_references() {
        let env = |path_id: i64| {
            Node::mapping([(
                "m_Texture",
                Node::mapping([("m_FileID", Node::Int(0)), ("m_PathID", Node::Int(path_id))]),
            )])
        };
        let tree = Node::mapping([(
            "m_SavedProperties",
            Node::mapping([(
                "m_TexEnvs",
                Node::Sequence(vec![pair("_MainTex", env(-42)), pair("_BumpMap", env(0))]),
            )]),
        )]);
        let props = MaterialProperties::from_tree(&tree);
        assert_eq!(props.textures.len(), 1);
        let binding = &props.textures["_MainTex"];
        assert_eq!(binding.path_id, PathId::new(-42));
        assert_eq!(binding.scale, (1.0, 1.0));
        assert_eq!(binding.offset, (0.0, 0.0));
    }

    #[test]
    fn test_texenv_string_identifier_is_kept() {
        let env = Node::mapping([(
            "m_Texture",
            Node::mapping([("m_FileID", Node::Int(0)), ("m_PathID", Node::from("123"))]),
        )]);
        let tree = Node::mapping([(
            "m_SavedProperties",
            Node::mapping([(
                "m_TexEnvs",
                Node::Sequence(vec![pair("_MainTex", env)]),
            )]),
        )]);
        let props = MaterialProperties::from_tree(&tree);
        assert_eq!(props.textures["_MainTex"].path_id, PathId::new(123));
    }

    #[test]
    fn test_first_second_pairs_and_mappings() {
        let tree = Node::mapping([(
            "m_SavedProperties",
            Node::mapping([
                (
                    "m_Floats",
                    Node::Sequence(vec![Node::mapping([
                        ("first", Node::from("_Cutoff")),
                        ("second", Node::Float(0.5)),
                    ])]),
                ),
                (
                    "m_Colors",
                    Node::mapping([(
                        "_Color",
                        Node::mapping([("r", Node::Int(0)), ("g", Node::Int(0))]),
                    )]),
                ),
            ]),
        )]);
        let props = MaterialProperties::from_tree(&tree);
        assert_eq!(props.floats["_Cutoff"], 0.5);
        assert_eq!(props.colors["_Color"].r, 0.0);
        assert_eq!(props.colors["_Color"].a, 1.0);
    }

    #[test]
    fn test_empty_groups_are_omitted() {
        let fields = MaterialProperties::default().into_fields();
        assert!(fields.is_empty());
    }
}
