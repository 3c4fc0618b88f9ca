//! bundlesnap-diff
//!
//! Compare generated snapshots against reference snapshots.
//! Exit status: 0 when equal, 1 on mismatches, 2 on usage errors.

use bundlesnap_cli::commands::diff::{self, DiffArgs};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "bundlesnap-diff", version)]
#[command(about = "Compare two snapshot directories", long_about = None)]
struct Cli {
    #[command(flatten)]
    diff: DiffArgs,
}

fn main() {
    // clap exits with 2 on argument errors
    let cli = Cli::parse();

    match diff::execute(cli.diff) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
