//! Batch generation over a file or a directory of bundles.

#![allow(clippy::result_large_err)]

use bundlesnap_core::errors::{ExError, ExErrorKind};
use bundlesnap_core::{log_op_end, log_op_start, AssetLibrary};
use bundlesnap_store::errors::Result;
use bundlesnap_store::layout::{write_snapshots_index, SnapshotsIndex};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use super::bundle::{bundle_stem, generate_bundle_snapshot};
use super::report::{BatchEntry, BatchReport};

/// Resolve the input argument into the ordered list of bundles to process.
///
/// A file is taken as-is whatever its extension. A directory is scanned
/// recursively for files ending in `.{extension}`, sorted by path.
///
/// # Errors
///
/// - `NotFound` when `input` does not exist
/// - `NoInputFiles` when a directory holds no matching file
/// - `Io` when the directory cannot be walked
pub fn discover_inputs(input: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(ExError::new(ExErrorKind::NotFound)
            .with_op("discover_inputs")
            .with_path(input)
            .with_message(format!("{} does not exist", input.display())));
    }
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let extension = extension.trim_start_matches('.');
    let mut found = Vec::new();
    for entry in WalkDir::new(input).follow_links(true) {
        let entry = entry.map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("discover_inputs")
                .with_path(input)
                .with_message(e.to_string())
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == extension) {
            found.push(path.to_path_buf());
        }
    }
    found.sort();

    if found.is_empty() {
        return Err(ExError::new(ExErrorKind::NoInputFiles)
            .with_op("discover_inputs")
            .with_path(input)
            .with_message(format!("No .{} files found in {}", extension, input.display())));
    }
    Ok(found)
}

/// Snapshot every input into `output/<stem>/`, then write
/// `snapshots_index.json` for the bundles that succeeded.
///
/// `on_bundle` sees each entry as soon as its bundle is done.
///
/// # Errors
///
/// `Io` when the output directory cannot be created. Bundle failures are
/// reported in the returned [`BatchReport`].
pub fn generate_snapshots<L, F>(
    library: &L,
    inputs: &[PathBuf],
    output: &Path,
    mut on_bundle: F,
) -> Result<BatchReport>
where
    L: AssetLibrary,
    F: FnMut(&BatchEntry),
{
    let start = Instant::now();
    log_op_start!("generate_snapshots", bundle_count = inputs.len());

    std::fs::create_dir_all(output).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("create_output_dir")
            .with_path(output)
            .with_message(e.to_string())
    })?;

    let mut entries = Vec::with_capacity(inputs.len());
    let mut index = SnapshotsIndex::new();

    for input in inputs {
        let bundle_dir = output.join(bundle_stem(input));
        let result = generate_bundle_snapshot(library, input, &bundle_dir);
        if let Ok(report) = &result {
            if report.is_success() {
                index.insert(report.bundle_name.clone(), report.object_files.clone());
            }
        }
        let entry = BatchEntry {
            input: input.clone(),
            result,
        };
        on_bundle(&entry);
        entries.push(entry);
    }

    let index_path = match write_snapshots_index(output, &index) {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::warn!(
                err.code = err.code(),
                err.message = err.message(),
                "Failed to write snapshots index"
            );
            None
        }
    };

    let report = BatchReport {
        output: output.to_path_buf(),
        entries,
        index_path,
    };

    log_op_end!(
        "generate_snapshots",
        duration_ms = start.elapsed().as_millis() as u64,
        bundle_count = report.total(),
        succeeded = report.succeeded()
    );

    Ok(report)
}
