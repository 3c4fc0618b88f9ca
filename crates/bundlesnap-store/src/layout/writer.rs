//! Writing one bundle snapshot directory

#![allow(clippy::result_large_err)]

use bundlesnap_core::snapshot::{
    object_file_name, texture_relative_path, BundleManifest, Summary, TextureIndex,
    MANIFEST_FILE, OBJECTS_DIR, SUMMARY_FILE, TEXTURES_DIR, TEXTURES_INDEX_FILE,
};
use bundlesnap_core::TextureImage;
use bundlesnap_core_types::PathId;
use image::{ImageFormat, RgbaImage};
use serde_json::Value;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::to_pretty_json;
use crate::errors::{image_error, io_error_at, Result};
use crate::fs::atomic_write;

/// Writes the files of one bundle snapshot.
///
/// Every file is written atomically and independently; a failed write
/// leaves the other files untouched.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    root: PathBuf,
}

impl SnapshotWriter {
    /// Prepare `root` for a fresh snapshot.
    ///
    /// Creates the directory and removes the generated contents of a previous
    /// run (object files, textures and the texture index), so a rerun never
    /// leaves stale files behind. Anything else in `root` is left alone.
    ///
    /// # Errors
    ///
    /// `Io` when the directory cannot be created or cleared.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| io_error_at("create_snapshot_dir", &root, e))?;

        for dir in [OBJECTS_DIR, TEXTURES_DIR] {
            let path = root.join(dir);
            if path.is_dir() {
                fs::remove_dir_all(&path).map_err(|e| io_error_at("clear_snapshot_dir", &path, e))?;
            }
        }
        let index = root.join(TEXTURES_INDEX_FILE);
        if index.is_file() {
            fs::remove_file(&index).map_err(|e| io_error_at("clear_snapshot_dir", &index, e))?;
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// # Errors
    ///
    /// `Serialization` or `Io` on failure.
    pub fn write_manifest(&self, manifest: &BundleManifest) -> Result<PathBuf> {
        self.write_json(MANIFEST_FILE, manifest, "write_manifest")
    }

    /// # Errors
    ///
    /// `Serialization` or `Io` on failure.
    pub fn write_summary(&self, summary: &Summary) -> Result<PathBuf> {
        self.write_json(SUMMARY_FILE, summary, "write_summary")
    }

    /// # Errors
    ///
    /// `Serialization` or `Io` on failure.
    pub fn write_textures_index(&self, index: &TextureIndex) -> Result<PathBuf> {
        self.write_json(TEXTURES_INDEX_FILE, index, "write_textures_index")
    }

    /// Write one object document under `objects/` and return its file name.
    ///
    /// # Errors
    ///
    /// `Serialization` or `Io` on failure.
    pub fn write_object(
        &self,
        index: usize,
        type_name: &str,
        path_id: PathId,
        document: &Value,
    ) -> Result<String> {
        let file_name = object_file_name(index, type_name, path_id);
        let relative = Path::new(OBJECTS_DIR).join(&file_name);
        self.write_json(relative, document, "write_object")?;
        Ok(file_name)
    }

    /// Encode a texture as PNG under `textures/`.
    ///
    /// Returns the path relative to the snapshot root, or `None` for an
    /// empty image.
    ///
    /// # Errors
    ///
    /// `Image` when the pixel buffer does not match the dimensions or PNG
    /// encoding fails; `Io` when the file cannot be written.
    pub fn write_texture(&self, path_id: PathId, texture: &TextureImage) -> Result<Option<String>> {
        if texture.is_empty() {
            return Ok(None);
        }

        let image = RgbaImage::from_raw(texture.width, texture.height, texture.rgba.clone())
            .ok_or_else(|| {
                image_error(
                    "write_texture",
                    format!(
                        "pixel buffer of {} bytes does not match {}x{} RGBA",
                        texture.rgba.len(),
                        texture.width,
                        texture.height
                    ),
                )
            })?;

        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| image_error("write_texture", e.to_string()))?;

        let relative = texture_relative_path(path_id);
        atomic_write(&self.root.join(&relative), png.get_ref())?;

        tracing::debug!(
            path_id = %path_id,
            width = texture.width,
            height = texture.height,
            "Wrote texture"
        );

        Ok(Some(relative))
    }

    fn write_json<T>(&self, relative: impl AsRef<Path>, value: &T, op: &str) -> Result<PathBuf>
    where
        T: serde::Serialize + ?Sized,
    {
        let path = self.root.join(relative);
        let bytes = to_pretty_json(op, value)?;
        atomic_write(&path, &bytes).map_err(|e| e.with_op(op))?;
        Ok(path)
    }
}
