//! Snapshot diff command

use bundlesnap_core::compare::{CompareRules, DEFAULT_FLOAT_TOLERANCE, DEFAULT_SKIP_KEYS};
use bundlesnap_core::logging_facility::init;
use bundlesnap_core::snapshot::MANIFEST_FILE;
use bundlesnap_engine::{verify_snapshot, verify_snapshot_roots, VerificationReport};
use clap::Args;
use std::path::PathBuf;

use super::LogFormat;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Generated snapshot directory, or a root of snapshot directories
    pub test: PathBuf,

    /// Reference snapshot directory, or a root of snapshot directories
    pub reference: PathBuf,

    /// Extra path keyword excluded from comparison (repeatable)
    #[arg(long = "skip-key", value_name = "KEY")]
    pub skip_keys: Vec<String>,

    /// Largest float difference still treated as equal
    #[arg(long, default_value_t = DEFAULT_FLOAT_TOLERANCE)]
    pub tolerance: f64,

    #[arg(
        long,
        value_enum,
        env = "BUNDLESNAP_LOG_FORMAT",
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,
}

impl DiffArgs {
    /// Default skip keys plus any given on the command line
    pub fn rules(&self) -> CompareRules {
        CompareRules::new(
            DEFAULT_SKIP_KEYS
                .iter()
                .map(|k| k.to_string())
                .chain(self.skip_keys.iter().cloned()),
            self.tolerance,
        )
    }
}

/// Compare the two directories and print every mismatch.
///
/// A reference holding `manifest.json` is compared as one bundle snapshot;
/// anything else is treated as a root of bundle snapshots matched by name.
/// Returns whether everything matched.
///
/// # Errors
///
/// Returns an error when either directory cannot be read as a snapshot.
pub fn execute(args: DiffArgs) -> Result<bool, Box<dyn std::error::Error>> {
    init(args.log_format.into());
    let rules = args.rules();

    let reports = if args.reference.join(MANIFEST_FILE).is_file() {
        vec![verify_snapshot(&args.test, &args.reference, None, &rules)?]
    } else {
        verify_snapshot_roots(&args.test, &args.reference, &rules)?
    };

    for report in &reports {
        print_report(report);
    }

    let clean = reports.iter().filter(|r| r.is_clean()).count();
    println!();
    println!("{}/{} snapshots match", clean, reports.len());
    Ok(clean == reports.len())
}

fn print_report(report: &VerificationReport) {
    if report.is_clean() {
        println!("✓ {}", report.bundle);
        return;
    }
    println!(
        "✗ {} ({} findings, {} differences)",
        report.bundle,
        report.findings.len(),
        report.diff.len()
    );
    for finding in &report.findings {
        println!("  {}", finding);
    }
    for line in &report.diff {
        println!("  {}", line);
    }
}
