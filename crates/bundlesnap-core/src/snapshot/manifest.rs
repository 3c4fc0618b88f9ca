//! `manifest.json`

use serde::{Deserialize, Serialize};

use crate::library::{AssetFileHeader, Endianness};

/// Bundle-level facts, one per snapshot directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Input file stem; also the snapshot directory name
    pub bundle_name: String,
    pub file_name: String,
    /// Absolute path of the input at generation time
    pub file_path: String,
    pub file_size: u64,
    /// Lowercase hex SHA-256 of the input bytes
    pub file_sha256: String,
    /// Declared engine version, as declared
    pub unity_version: String,
    pub platform: String,
    /// Serialized file format version; 0 when the header omits it
    pub header_version: i64,
    pub endianness: Endianness,
    pub object_count: usize,
    /// RFC 3339 generation time
    pub timestamp: String,
}

/// Manifest fields taken from the first asset file's header
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFacts {
    pub unity_version: String,
    pub platform: String,
    pub header_version: i64,
    pub endianness: Endianness,
}

impl From<&AssetFileHeader> for HeaderFacts {
    fn from(header: &AssetFileHeader) -> Self {
        Self {
            unity_version: header
                .version
                .as_ref()
                .map(|v| v.display_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            platform: header
                .platform
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            header_version: header.header_version.unwrap_or(0),
            endianness: header.endianness,
        }
    }
}
