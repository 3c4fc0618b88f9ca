//! bundlesnap store - filesystem side of the snapshot pipeline
//!
//! Provides:
//! - atomic file writes and input file digests
//! - the snapshot directory writer and reader
//! - the bundle-export adapter, an `AssetLibrary` backed by JSON exports

pub mod errors;
pub mod export;
pub mod fs;
pub mod layout;

// Re-export key types
pub use errors::Result;
pub use export::ExportLibrary;
pub use layout::{write_snapshots_index, SnapshotReader, SnapshotWriter};
