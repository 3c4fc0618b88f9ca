//! Engine version resolution.
//!
//! Asset files declare the engine version they were built with in whatever
//! shape the library reports: a bare integer, a tuple of components, or a
//! version string such as `2019.4.31f1`. Mesh decoding needs a fixed
//! four-component tuple.

use crate::errors::{ExError, ExErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version assumed when an asset file declares nothing usable
pub const FALLBACK_MAJOR: u32 = 2022;

/// The engine version as declared by an asset file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclaredVersion {
    Int(i64),
    Tuple(Vec<u32>),
    Text(String),
}

impl DeclaredVersion {
    /// Render the declared version the way it appears in `manifest.json`
    pub fn display_string(&self) -> String {
        match self {
            DeclaredVersion::Int(v) => v.to_string(),
            DeclaredVersion::Tuple(parts) => parts
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join("."),
            DeclaredVersion::Text(s) => s.clone(),
        }
    }

    /// Normalize to four components, padding missing trailing ones with 0
    ///
    /// # Errors
    ///
    /// `InvalidVersion` for a negative or oversized integer, or a string
    /// whose leading digit run does not fit a component.
    pub fn parse(&self) -> Result<EngineVersion> {
        let invalid = || {
            ExError::new(ExErrorKind::InvalidVersion)
                .with_op("resolve_version")
                .with_message(format!("unusable engine version {}", self.display_string()))
        };
        match self {
            DeclaredVersion::Int(v) => u32::try_from(*v)
                .map(|major| EngineVersion([major, 0, 0, 0]))
                .map_err(|_| invalid()),
            DeclaredVersion::Tuple(parts) => Ok(EngineVersion::from_parts(parts)),
            DeclaredVersion::Text(s) => {
                let parts = numeric_runs(s);
                if parts.is_empty() {
                    Err(invalid())
                } else {
                    Ok(EngineVersion::from_parts(&parts))
                }
            }
        }
    }

    /// Like [`parse`](Self::parse), using the fallback version on failure
    pub fn resolve(&self) -> EngineVersion {
        self.parse().unwrap_or_else(|err| {
            tracing::warn!(
                err.code = err.code(),
                err.message = err.message(),
                fallback = FALLBACK_MAJOR,
                "Unparseable engine version, using fallback"
            );
            EngineVersion([FALLBACK_MAJOR, 0, 0, 0])
        })
    }
}

impl Default for DeclaredVersion {
    fn default() -> Self {
        DeclaredVersion::Int(i64::from(FALLBACK_MAJOR))
    }
}

/// Leading numeric components of a version string; `2019.4.31f1` → 2019, 4, 31, 1
///
/// Stops at the first run that overflows a component.
fn numeric_runs(s: &str) -> Vec<u32> {
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map_while(|run| run.parse::<u32>().ok())
        .take(4)
        .collect()
}

/// A fixed four-component engine version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EngineVersion(pub [u32; 4]);

impl EngineVersion {
    fn from_parts(parts: &[u32]) -> Self {
        let mut out = [0u32; 4];
        for (slot, part) in out.iter_mut().zip(parts) {
            *slot = *part;
        }
        EngineVersion(out)
    }

    pub fn major(&self) -> u32 {
        self.0[0]
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}
