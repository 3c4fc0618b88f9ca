//! bundlesnap
//!
//! Generate JSON snapshots of bundle exports: `bundlesnap <input> <output>`

use bundlesnap_cli::commands::generate::{self, GenerateArgs};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "bundlesnap", version)]
#[command(about = "Generate JSON snapshots of asset bundles", long_about = None)]
struct Cli {
    #[command(flatten)]
    generate: GenerateArgs,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if !cli.generate.input.exists() {
        eprintln!(
            "Error: Input path does not exist: {}",
            cli.generate.input.display()
        );
        eprintln!();
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(1);
    }

    if let Err(e) = generate::execute(cli.generate) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
