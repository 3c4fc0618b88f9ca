//! File names inside a bundle snapshot directory

use bundlesnap_core_types::PathId;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const SUMMARY_FILE: &str = "summary.json";
pub const TEXTURES_INDEX_FILE: &str = "textures_index.json";
pub const SNAPSHOTS_INDEX_FILE: &str = "snapshots_index.json";
pub const OBJECTS_DIR: &str = "objects";
pub const TEXTURES_DIR: &str = "textures";

/// `{NNN}_{type}_{id}.json`, index zero-padded to at least three digits.
///
/// The type name is used verbatim; callers own its character set.
pub fn object_file_name(index: usize, type_name: &str, path_id: PathId) -> String {
    format!("{:03}_{}_{}.json", index, type_name, path_id)
}

/// `tex_{id}.png`
pub fn texture_file_name(path_id: PathId) -> String {
    format!("tex_{}.png", path_id)
}

/// Path of a texture relative to the bundle snapshot directory, always with
/// forward slashes
pub fn texture_relative_path(path_id: PathId) -> String {
    format!("{}/{}", TEXTURES_DIR, texture_file_name(path_id))
}
