//! Bundle-export adapter
//!
//! An [`AssetLibrary`](bundlesnap_core::AssetLibrary) over JSON bundle
//! exports. The export is produced by the external asset parser: container
//! parsing, mesh decompression and texture decoding have already happened,
//! and their results (or failures) are recorded per object.

pub mod format;
pub mod library;
pub mod tree;

pub use format::{ExportAssetFile, ExportDocument, ExportMesh, ExportObject, ExportTexture};
pub use library::{ExportFile, ExportLibrary};
pub use tree::node_from_export;
