//! bundlesnap core - snapshot model and pure transformations
//!
//! This crate holds everything that does not touch the filesystem:
//! - the closed property-tree model handed over by an asset library
//! - value normalization into JSON-safe documents
//! - per-object document building with mesh and material enrichment
//! - the snapshot model (manifest, summary, texture index, file naming)
//! - the snapshot comparator
//! - the error and logging facilities shared by every crate

pub mod builder;
pub mod compare;
pub mod errors;
pub mod library;
pub mod logging_facility;
pub mod normalize;
pub mod snapshot;
pub mod tree;
pub mod version;

pub use bundlesnap_core_types::schema;

// Re-export commonly used types
pub use builder::{build_object_snapshot, ObjectSnapshot};
pub use compare::{compare_values, find_non_string_identifiers, CompareRules, DiffReport};
pub use errors::{ExError, ExErrorKind, LibraryError, Result};
pub use library::{
    AssetFile, AssetFileHeader, AssetLibrary, DecodedMesh, Endianness, ObjectInfo, TextureImage,
};
pub use normalize::normalize;
pub use tree::{Mapping, Node};
pub use version::{DeclaredVersion, EngineVersion};
