//! Reading a snapshot directory back
//!
//! Snapshots are read as raw JSON so that directories written by other
//! generators (reference snapshots, older runs) can still be compared.

#![allow(clippy::result_large_err)]

use bundlesnap_core::snapshot::{
    MANIFEST_FILE, OBJECTS_DIR, SUMMARY_FILE, TEXTURES_DIR, TEXTURES_INDEX_FILE,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{invalid_snapshot, io_error_at, Result};

#[derive(Debug, Clone)]
pub struct SnapshotReader {
    root: PathBuf,
}

impl SnapshotReader {
    /// # Errors
    ///
    /// `InvalidSnapshot` when `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(invalid_snapshot(&root, "snapshot directory does not exist"));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory name, which is the bundle name
    pub fn bundle_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// # Errors
    ///
    /// `InvalidSnapshot` when the file is missing or not JSON.
    pub fn manifest(&self) -> Result<Value> {
        self.read_json(&self.root.join(MANIFEST_FILE))
    }

    /// # Errors
    ///
    /// `InvalidSnapshot` when the file is missing or not JSON.
    pub fn summary(&self) -> Result<Value> {
        self.read_json(&self.root.join(SUMMARY_FILE))
    }

    /// `None` when the bundle produced no textures.
    ///
    /// # Errors
    ///
    /// `InvalidSnapshot` when the file exists but is not JSON.
    pub fn textures_index(&self) -> Result<Option<Value>> {
        let path = self.root.join(TEXTURES_INDEX_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        self.read_json(&path).map(Some)
    }

    /// Object document paths, sorted by file name.
    ///
    /// Zero-padded indices make this the canonical object order.
    ///
    /// # Errors
    ///
    /// `Io` when the objects directory cannot be listed.
    pub fn object_files(&self) -> Result<Vec<PathBuf>> {
        self.list(OBJECTS_DIR, "json")
    }

    /// Texture file paths, sorted by file name.
    ///
    /// # Errors
    ///
    /// `Io` when the textures directory cannot be listed.
    pub fn texture_files(&self) -> Result<Vec<PathBuf>> {
        self.list(TEXTURES_DIR, "png")
    }

    /// # Errors
    ///
    /// `InvalidSnapshot` when the file is missing or not JSON.
    pub fn read_json(&self, path: &Path) -> Result<Value> {
        let bytes = fs::read(path)
            .map_err(|e| invalid_snapshot(path, format!("cannot read file: {}", e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| invalid_snapshot(path, format!("not valid JSON: {}", e)))
    }

    fn list(&self, dir: &str, extension: &str) -> Result<Vec<PathBuf>> {
        let dir = self.root.join(dir);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| io_error_at("list_snapshot_dir", &dir, e))? {
            let path = entry
                .map_err(|e| io_error_at("list_snapshot_dir", &dir, e))?
                .path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SnapshotWriter;
    use bundlesnap_core_types::PathId;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_is_invalid_snapshot() {
        let dir = TempDir::new().unwrap();
        let err = SnapshotReader::open(dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), bundlesnap_core::ExErrorKind::InvalidSnapshot);
    }

    #[test]
    fn test_object_files_sorted() {
        let dir = TempDir::new().unwrap();
        let writer = SnapshotWriter::create(dir.path().join("FoxMask_head")).unwrap();
        for (i, id) in [5i64, -2, 9].iter().enumerate() {
            writer
                .write_object(i, "GameObject", PathId::new(*id), &json!({}))
                .unwrap();
        }

        let reader = SnapshotReader::open(writer.root()).unwrap();
        let names: Vec<String> = reader
            .object_files()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(reader.bundle_name(), "FoxMask_head");
        assert_eq!(
            names,
            vec![
                "000_GameObject_5.json",
                "001_GameObject_-2.json",
                "002_GameObject_9.json"
            ]
        );
        assert!(reader.textures_index().unwrap().is_none());
        assert!(reader.texture_files().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_manifest_is_invalid_snapshot() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manifest.json"), b"{not json").unwrap();
        let reader = SnapshotReader::open(dir.path()).unwrap();

        let err = reader.manifest().unwrap_err();
        assert_eq!(err.kind(), bundlesnap_core::ExErrorKind::InvalidSnapshot);
    }
}
