use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use find_impure_data::commands::scan_command;

/// Scan object files (*.o) for impure data.
///
/// Every symbol found in an initialized-data, BSS or common section is printed as
/// `file:symbol:size`, one per line. Empty output means no impure data was found.
#[derive(Parser, Debug)]
#[command(
    name = "find-impure-data",
    version,
    about = "Scan object files (*.o) for impure data",
    long_about = None
)]
struct Cli {
    /// Path to search for object files
    path: PathBuf,
}

fn main() -> Result<()> {
    find_impure_data::init_logging();
    let cli = Cli::parse();
    log::debug!("impure-core v{}", impure_core::version());
    scan_command(&cli.path)
}
