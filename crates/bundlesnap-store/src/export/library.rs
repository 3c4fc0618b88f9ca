//! [`AssetLibrary`] implementation over bundle exports

#![allow(clippy::result_large_err)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bundlesnap_core::{
    AssetFile, AssetFileHeader, AssetLibrary, DecodedMesh, EngineVersion, LibraryError, Node,
    ObjectInfo, TextureImage,
};
use std::fs;
use std::path::Path;

use super::format::{ExportAssetFile, ExportDocument, ExportObject};
use super::tree::node_from_export;

/// Reads bundle export documents from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportLibrary;

impl ExportLibrary {
    pub fn new() -> Self {
        Self
    }

    /// Parse an export document held in memory.
    ///
    /// # Errors
    ///
    /// `LibraryError::Load` when the text is not a valid export document.
    pub fn load_str(&self, content: &str) -> Result<Vec<ExportFile>, LibraryError> {
        let doc: ExportDocument = serde_json::from_str(content).map_err(|e| LibraryError::Load {
            reason: format!("invalid bundle export: {}", e),
        })?;
        Ok(doc.asset_files.into_iter().map(ExportFile::new).collect())
    }
}

impl AssetLibrary for ExportLibrary {
    type File = ExportFile;

    fn load(&self, path: &Path) -> Result<Vec<ExportFile>, LibraryError> {
        let content = fs::read_to_string(path).map_err(|e| LibraryError::Load {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        self.load_str(&content)
    }
}

/// One asset file of a loaded export
#[derive(Debug, Clone)]
pub struct ExportFile {
    inner: ExportAssetFile,
}

impl ExportFile {
    fn new(inner: ExportAssetFile) -> Self {
        Self { inner }
    }

    fn find(&self, object: &ObjectInfo) -> Result<&ExportObject, LibraryError> {
        self.inner
            .objects
            .iter()
            .find(|o| o.path_id == object.path_id)
            .ok_or(LibraryError::ObjectNotFound {
                path_id: object.path_id,
            })
    }
}

impl AssetFile for ExportFile {
    fn header(&self) -> AssetFileHeader {
        AssetFileHeader {
            version: self.inner.version.clone(),
            platform: self.inner.platform.clone(),
            header_version: self.inner.header_version,
            endianness: self.inner.endianness,
        }
    }

    fn objects(&self) -> Vec<ObjectInfo> {
        self.inner
            .objects
            .iter()
            .map(|o| ObjectInfo {
                path_id: o.path_id,
                class_id: o.class_id,
                type_name: o.type_name.clone(),
                byte_start: o.byte_start,
                byte_size: o.byte_size,
            })
            .collect()
    }

    fn read_tree(&self, object: &ObjectInfo) -> Result<Node, LibraryError> {
        let exported = self.find(object)?;
        let parse_failure = |reason: String| LibraryError::Parse {
            path_id: object.path_id,
            reason,
        };

        if let Some(reason) = &exported.parse_error {
            return Err(parse_failure(reason.clone()));
        }
        let tree = exported
            .tree
            .as_ref()
            .ok_or_else(|| parse_failure("object has no property tree".to_string()))?;
        node_from_export(tree).map_err(parse_failure)
    }

    fn decode_mesh(
        &self,
        object: &ObjectInfo,
        version: EngineVersion,
    ) -> Result<DecodedMesh, LibraryError> {
        let exported = self.find(object)?;
        let failure = |reason: String| LibraryError::MeshDecode {
            path_id: object.path_id,
            reason,
        };

        if let Some(reason) = &exported.mesh_error {
            return Err(failure(reason.clone()));
        }
        let mesh = exported.mesh.as_ref().ok_or_else(|| {
            failure(format!("no decoded geometry for engine version {}", version))
        })?;

        Ok(DecodedMesh {
            vertices: mesh.vertices.clone(),
            indices: mesh.indices.clone(),
            uv0: mesh.uv0.clone(),
            uv1: mesh.uv1.clone(),
            normals: mesh.normals.clone(),
            tangents: mesh.tangents.clone(),
            colors: mesh.colors.clone(),
        })
    }

    fn decode_texture(&self, object: &ObjectInfo) -> Result<Option<TextureImage>, LibraryError> {
        let exported = self.find(object)?;
        let failure = |reason: String| LibraryError::TextureDecode {
            path_id: object.path_id,
            reason,
        };

        if let Some(reason) = &exported.texture_error {
            return Err(failure(reason.clone()));
        }
        let Some(texture) = &exported.texture else {
            return Ok(None);
        };

        let rgba = STANDARD
            .decode(&texture.rgba)
            .map_err(|e| failure(format!("invalid pixel payload: {}", e)))?;
        let expected = u64::from(texture.width) * u64::from(texture.height) * 4;
        if rgba.len() as u64 != expected {
            return Err(failure(format!(
                "expected {} RGBA bytes for {}x{}, got {}",
                expected,
                texture.width,
                texture.height,
                rgba.len()
            )));
        }

        Ok(Some(TextureImage {
            width: texture.width,
            height: texture.height,
            rgba,
        }))
    }
}
