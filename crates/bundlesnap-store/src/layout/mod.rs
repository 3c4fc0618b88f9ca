//! Snapshot directory layout
//!
//! ```text
//! <output>/
//!   snapshots_index.json
//!   <bundle>/
//!     manifest.json
//!     summary.json
//!     textures_index.json      only when a texture was written
//!     textures/tex_<id>.png
//!     objects/<NNN>_<type>_<id>.json
//! ```

pub mod index;
pub mod reader;
pub mod writer;

pub use index::{write_snapshots_index, SnapshotsIndex};
pub use reader::SnapshotReader;
pub use writer::SnapshotWriter;

use crate::errors::{serialization_error, Result};
use serde::Serialize;

/// Pretty JSON with two-space indentation, as stored on disk
pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(op: &str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|e| serialization_error(op, e))
}
