//! Bundle export schema
//!
//! ```json
//! {
//!   "asset_files": [{
//!     "version": "2019.4.31f1",
//!     "platform": "StandaloneWindows64",
//!     "header_version": 22,
//!     "endianness": "little",
//!     "objects": [{
//!       "path_id": "-8911878726397676121",
//!       "class_id": 43,
//!       "type": "Mesh",
//!       "byte_start": 4096,
//!       "byte_size": 2048,
//!       "tree": { "m_Name": "Body", "m_IndexBuffer": {"$bytes": "AAEC"} },
//!       "mesh": { "vertices": [[0, 0, 0]], "indices": [0] }
//!     }]
//!   }]
//! }
//! ```

use bundlesnap_core::version::DeclaredVersion;
use bundlesnap_core::Endianness;
use bundlesnap_core_types::PathId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub asset_files: Vec<ExportAssetFile>,
}

/// One serialized asset file inside the bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportAssetFile {
    #[serde(default)]
    pub version: Option<DeclaredVersion>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub header_version: Option<i64>,
    #[serde(default)]
    pub endianness: Endianness,
    #[serde(default)]
    pub objects: Vec<ExportObject>,
}

/// One object with its parsed tree and decoded payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportObject {
    /// Decimal string or JSON integer
    pub path_id: PathId,
    pub class_id: i32,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub byte_start: u64,
    #[serde(default)]
    pub byte_size: u64,

    /// Property tree; `$bytes` and `$float` objects carry values JSON
    /// cannot hold directly
    #[serde(default)]
    pub tree: Option<Value>,
    #[serde(default)]
    pub parse_error: Option<String>,

    #[serde(default)]
    pub mesh: Option<ExportMesh>,
    #[serde(default)]
    pub mesh_error: Option<String>,

    #[serde(default)]
    pub texture: Option<ExportTexture>,
    #[serde(default)]
    pub texture_error: Option<String>,
}

/// Decoded mesh geometry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportMesh {
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub uv0: Vec<[f32; 2]>,
    pub uv1: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub tangents: Vec<[f32; 4]>,
    pub colors: Vec<[f32; 4]>,
}

/// Decoded texture, RGBA8 pixels in standard base64
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportTexture {
    pub width: u32,
    pub height: u32,
    pub rgba: String,
}
