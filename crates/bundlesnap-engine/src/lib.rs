//! bundlesnap engine - snapshot generation and verification
//!
//! Drives an [`AssetLibrary`](bundlesnap_core::AssetLibrary) over one bundle
//! or a directory of bundles, writes snapshot directories through the store
//! and checks generated snapshots against reference snapshots.

pub mod commands;

pub use commands::batch::{discover_inputs, generate_snapshots};
pub use commands::bundle::generate_bundle_snapshot;
pub use commands::report::{
    BatchEntry, BatchReport, BundleReport, ItemKind, ItemOutcome, ItemStatus,
};
pub use commands::verify::{
    check_texenv_format, verify_snapshot, verify_snapshot_roots, BundleExpectation,
    VerificationReport, REFERENCE_CATALOG,
};
