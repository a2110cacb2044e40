//! CLI argument parsing for calibrate-tests.
//!
//! Uses clap derive macros for declarative argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Rewrite the expected outputs recorded in Fortress `.test` files so they
/// match what the current compiler actually prints.
///
/// Each file names a source file, a run mode (`compile` or `typecheck`) and
/// a tests directory. The compiler is run on the source, its output is
/// normalized against the installation paths, and any stale expectation is
/// replaced in place.
#[derive(Parser, Debug)]
#[command(name = "calibrate-tests")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Test files to calibrate, processed in the order given.
    #[arg(required = true, value_name = "TEST_FILE")]
    pub files: Vec<PathBuf>,

    /// Root of the Fortress installation.
    #[arg(long, env = "FORTRESS_HOME", value_name = "DIR")]
    pub fortress_home: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
