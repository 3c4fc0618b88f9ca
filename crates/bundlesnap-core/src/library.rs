//! Asset library boundary.
//!
//! Container parsing, mesh decompression and texture decoding are owned by an
//! external asset library. These traits are the only surface the snapshot
//! pipeline calls; an implementation converts its own objects into
//! [`Node`] trees and the plain structs below.

use bundlesnap_core_types::PathId;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::LibraryError;
use crate::tree::Node;
use crate::version::{DeclaredVersion, EngineVersion};

/// Byte order of an asset file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

impl Endianness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endianness::Little => "little",
            Endianness::Big => "big",
        }
    }
}

/// Header facts of one asset file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssetFileHeader {
    pub version: Option<DeclaredVersion>,
    pub platform: Option<String>,
    pub header_version: Option<i64>,
    pub endianness: Endianness,
}

/// One object as enumerated by the library
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    pub path_id: PathId,
    pub class_id: i32,
    pub type_name: String,
    pub byte_start: u64,
    pub byte_size: u64,
}

/// Fully decoded mesh geometry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedMesh {
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub uv0: Vec<[f32; 2]>,
    pub uv1: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub tangents: Vec<[f32; 4]>,
    /// Decoded but never written to snapshots
    pub colors: Vec<[f32; 4]>,
}

/// Decoded texture pixels, tightly packed RGBA8
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// A texture with no dimensions or no pixels produces no file.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.rgba.is_empty()
    }
}

/// Entry point of an asset library
pub trait AssetLibrary {
    type File: AssetFile;

    /// Load a bundle file and return the asset files it contains.
    ///
    /// # Errors
    ///
    /// `LibraryError::Load` when no container could be read from `path`.
    fn load(&self, path: &Path) -> Result<Vec<Self::File>, LibraryError>;
}

/// One serialized asset file inside a loaded bundle
pub trait AssetFile {
    fn header(&self) -> AssetFileHeader;

    /// All objects, in the library's enumeration order.
    fn objects(&self) -> Vec<ObjectInfo>;

    /// Parse an object into its generic property tree.
    ///
    /// # Errors
    ///
    /// `LibraryError::Parse` when the object's type tree cannot be read.
    fn read_tree(&self, object: &ObjectInfo) -> Result<Node, LibraryError>;

    /// Decode a mesh object's geometry.
    ///
    /// # Errors
    ///
    /// `LibraryError::MeshDecode` when the geometry cannot be decompressed.
    fn decode_mesh(
        &self,
        object: &ObjectInfo,
        version: EngineVersion,
    ) -> Result<DecodedMesh, LibraryError>;

    /// Decode a texture object's pixels. `Ok(None)` means the object has no
    /// image data at all.
    ///
    /// # Errors
    ///
    /// `LibraryError::TextureDecode` when the pixel format is unsupported or
    /// the data is corrupt.
    fn decode_texture(&self, object: &ObjectInfo) -> Result<Option<TextureImage>, LibraryError>;
}
