//! Snapshot model.
//!
//! The on-disk shape of a bundle snapshot: manifest, summary, texture index
//! and per-object file naming. Identifiers are carried as [`PathId`] and
//! serialize as decimal strings.
//!
//! [`PathId`]: bundlesnap_core_types::PathId

pub mod layout;
pub mod manifest;
pub mod summary;

pub use layout::{
    object_file_name, texture_file_name, texture_relative_path, MANIFEST_FILE, OBJECTS_DIR,
    SNAPSHOTS_INDEX_FILE, SUMMARY_FILE, TEXTURES_DIR, TEXTURES_INDEX_FILE,
};
pub use manifest::{BundleManifest, HeaderFacts};
pub use summary::{Summary, SummaryEntry, TextureIndex};
