//! Object identifiers (PathIDs)
//!
//! A PathID names one object inside a bundle. Values span the full signed
//! 64-bit range and routinely exceed what a JSON consumer can hold in a
//! double, so they are always written as decimal strings. Reading accepts
//! either a string or an integer so older snapshots still load.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Field names whose integer values are identifiers.
///
/// Matching is exact; `path_id` is the name used by our own documents, the
/// rest appear in raw property trees.
pub const IDENTIFIER_FIELDS: &[&str] = &["path_id", "m_PathID", "m_PathId", "pathID", "PathID"];

/// Returns true when `name` is one of [`IDENTIFIER_FIELDS`].
pub fn is_identifier_field(name: &str) -> bool {
    IDENTIFIER_FIELDS.contains(&name)
}

/// 64-bit signed object identifier, serialized as a decimal string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PathId(i64);

impl PathId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// A zero PathID is a null reference.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for PathId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not a decimal i64
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathIdParseError {
    input: String,
}

impl fmt::Display for PathIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a decimal 64-bit identifier: {:?}", self.input)
    }
}

impl std::error::Error for PathIdParseError {}

impl FromStr for PathId {
    type Err = PathIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // i64::from_str accepts a leading '+', which would not re-render identically
        if s.starts_with('+') {
            return Err(PathIdParseError {
                input: s.to_string(),
            });
        }
        s.parse::<i64>().map(Self).map_err(|_| PathIdParseError {
            input: s.to_string(),
        })
    }
}

impl Serialize for PathId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct PathIdVisitor;

impl<'de> Visitor<'de> for PathIdVisitor {
    type Value = PathId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal identifier string or a 64-bit integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<PathId, E> {
        Ok(PathId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PathId, E> {
        i64::try_from(v)
            .map(PathId)
            .map_err(|_| E::custom(format!("identifier {} exceeds i64", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PathId, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for PathId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PathIdVisitor)
    }
}
