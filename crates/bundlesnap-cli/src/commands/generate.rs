//! Snapshot generation command

use bundlesnap_core::logging_facility::init;
use bundlesnap_engine::{
    discover_inputs, generate_snapshots, BatchEntry, BundleReport, ItemKind, ItemStatus,
};
use bundlesnap_store::ExportLibrary;
use clap::Args;
use std::path::{Path, PathBuf};

use super::LogFormat;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Bundle file, or a directory scanned recursively for bundles
    pub input: PathBuf,

    /// Directory receiving one snapshot directory per bundle
    pub output: PathBuf,

    /// Bundle file extension used when scanning a directory
    #[arg(long, env = "BUNDLESNAP_EXTENSION", default_value = "hhh")]
    pub extension: String,

    #[arg(
        long,
        value_enum,
        env = "BUNDLESNAP_LOG_FORMAT",
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,
}

/// Snapshot every bundle under `args.input` and print a progress report.
///
/// Failed bundles are printed and do not fail the command.
///
/// # Errors
///
/// Returns an error when no bundle can be found or the output directory
/// cannot be created.
pub fn execute(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    init(args.log_format.into());
    tracing::debug!(
        input = %args.input.display(),
        output = %args.output.display(),
        extension = %args.extension,
        "Starting generation"
    );

    let inputs = discover_inputs(&args.input, &args.extension)?;
    let total = inputs.len();
    println!("Generating snapshots for {} file(s)", total);

    let library = ExportLibrary::new();
    let mut position = 0;
    let report = generate_snapshots(&library, &inputs, &args.output, |entry| {
        position += 1;
        print_entry(position, total, entry);
    })?;

    println!();
    println!(
        "Generated {}/{} successful snapshots",
        report.succeeded(),
        report.total()
    );
    println!("Output: {}", absolute(&args.output).display());
    Ok(())
}

fn print_entry(position: usize, total: usize, entry: &BatchEntry) {
    let name = entry
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!();
    println!("[{}/{}] {}", position, total, name);

    match &entry.result {
        Ok(report) => print_bundle(report),
        Err(err) => println!("  ✗ Error: {}", err),
    }
}

fn print_bundle(report: &BundleReport) {
    for item in &report.items {
        match (item.kind, &item.status) {
            // objects are summarized below
            (ItemKind::Object, ItemStatus::Written) => {}
            (_, ItemStatus::Written) => println!("  ✓ {}", item.name),
            (ItemKind::Texture, ItemStatus::Skipped(reason)) => {
                println!("  - texture {} skipped: {}", item.name, reason)
            }
            (_, ItemStatus::Skipped(reason)) => println!("  - {} skipped: {}", item.name, reason),
            (ItemKind::Texture, ItemStatus::Failed(err)) => {
                println!("  ✗ texture {}: {}", item.name, err)
            }
            (_, ItemStatus::Failed(err)) => println!("  ✗ {}: {}", item.name, err),
        }
    }

    println!("  ✓ {} object snapshots", report.object_files.len());
    for item in report.degraded() {
        for issue in &item.issues {
            println!("  ! {}: {}", item.name, issue);
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
