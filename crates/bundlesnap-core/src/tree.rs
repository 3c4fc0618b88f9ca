//! Property trees
//!
//! [`Node`] is the closed set of value kinds an asset library may hand us.
//! Libraries convert their own object representation into this model at the
//! boundary; everything downstream matches on these variants only.

use bundlesnap_core_types::PathId;
use std::collections::BTreeMap;

/// Mapping node contents, keyed by field name
pub type Mapping = BTreeMap<String, Node>;

/// One value in a property tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Sequence(Vec<Node>),
    Mapping(Mapping),
    /// An identifier placed by the snapshot builder. Always rendered as a
    /// decimal string, whatever field it sits under.
    Id(PathId),
}

impl Node {
    /// Build a mapping node from `(key, value)` pairs
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Look up a key on a mapping node
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value as f64, for ints and floats alike
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Int(v) => Some(*v as f64),
            Node::UInt(v) => Some(*v as f64),
            Node::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer value as i64; floats and out-of-range unsigned values yield None
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Int(v) => Some(*v),
            Node::UInt(v) => i64::try_from(*v).ok(),
            Node::Id(id) => Some(id.get()),
            _ => None,
        }
    }

    /// Identifier value from an integer, a typed id or a decimal string
    pub fn as_path_id(&self) -> Option<PathId> {
        match self {
            Node::String(s) => s.parse().ok(),
            other => other.as_i64().map(PathId::new),
        }
    }

    /// Empty containers, zero, empty strings and null are false
    pub fn is_truthy(&self) -> bool {
        match self {
            Node::Null => false,
            Node::Bool(b) => *b,
            Node::Int(v) => *v != 0,
            Node::UInt(v) => *v != 0,
            Node::Float(v) => *v != 0.0,
            Node::String(s) => !s.is_empty(),
            Node::Bytes(b) => !b.is_empty(),
            Node::Sequence(items) => !items.is_empty(),
            Node::Mapping(map) => !map.is_empty(),
            Node::Id(id) => !id.is_null(),
        }
    }

    /// Length of a sequence or byte blob; 0 for anything else
    pub fn len(&self) -> usize {
        match self {
            Node::Sequence(items) => items.len(),
            Node::Bytes(b) => b.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<bool> for Node {
    fn from(v: bool) -> Self {
        Node::Bool(v)
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Node::Int(v)
    }
}

impl From<u64> for Node {
    fn from(v: u64) -> Self {
        Node::UInt(v)
    }
}

impl From<usize> for Node {
    fn from(v: usize) -> Self {
        Node::UInt(v as u64)
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Node::Float(v)
    }
}

impl From<f32> for Node {
    fn from(v: f32) -> Self {
        Node::Float(f64::from(v))
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Node::String(v.to_string())
    }
}

impl From<String> for Node {
    fn from(v: String) -> Self {
        Node::String(v)
    }
}

impl From<PathId> for Node {
    fn from(v: PathId) -> Self {
        Node::Id(v)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(v: Vec<T>) -> Self {
        Node::Sequence(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_id_from_int_id_and_string() {
        assert_eq!(Node::Int(-5).as_path_id(), Some(PathId::new(-5)));
        assert_eq!(Node::Id(PathId::new(7)).as_path_id(), Some(PathId::new(7)));
        assert_eq!(
            Node::from("-8911878726397676121").as_path_id(),
            Some(PathId::new(-8911878726397676121))
        );
        assert_eq!(Node::from("tex").as_path_id(), None);
        assert_eq!(Node::Float(1.5).as_path_id(), None);
    }

    #[test]
    fn test_truthiness_matches_container_emptiness() {
        assert!(!Node::Mapping(Mapping::new()).is_truthy());
        assert!(Node::mapping([("size", Node::Int(0))]).is_truthy());
        assert!(!Node::Sequence(vec![]).is_truthy());
        assert!(!Node::Null.is_truthy());
        assert!(Node::Bytes(vec![0]).is_truthy());
    }

    #[test]
    fn test_as_f64_accepts_integers() {
        assert_eq!(Node::Int(1).as_f64(), Some(1.0));
        assert_eq!(Node::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Node::String("1".into()).as_f64(), None);
    }

    #[test]
    fn test_len_counts_sequences_and_blobs() {
        assert_eq!(Node::from(vec![1i64, 2, 3]).len(), 3);
        assert_eq!(Node::Bytes(vec![1, 2]).len(), 2);
        assert_eq!(Node::Int(5).len(), 0);
    }
}
