//! Cross-bundle `snapshots_index.json`

use bundlesnap_core::snapshot::SNAPSHOTS_INDEX_FILE;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::to_pretty_json;
use crate::errors::Result;
use crate::fs::atomic_write;

/// Bundle name → object file names in canonical order
pub type SnapshotsIndex = BTreeMap<String, Vec<String>>;

/// Write the index of every successfully snapshotted bundle under `output`.
///
/// # Errors
///
/// `Serialization` or `Io` on failure.
pub fn write_snapshots_index(output: &Path, index: &SnapshotsIndex) -> Result<PathBuf> {
    let path = output.join(SNAPSHOTS_INDEX_FILE);
    let bytes = to_pretty_json("write_snapshots_index", index)?;
    atomic_write(&path, &bytes)?;
    Ok(path)
}
