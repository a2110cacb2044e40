//! calibrate-tests: rewrite stale expected outputs in Fortress `.test` files.
//!
//! This is the main entry point. It parses arguments, resolves the
//! installation, asks for confirmation, then calibrates each file in turn.
//! Per-file failures are reported and do not change the exit status; only
//! errors that stop the whole run exit non-zero.

mod calibrate;
mod cli;
mod compiler;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
mod logging;
pub mod normalize;
pub mod value;

#[cfg(test)]
mod test_support;

use calibrate::{Calibrator, confirm};
use cli::Cli;
use compiler::FortressCompiler;
use context::CalibrationContext;
use error::Result;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init_tracing();
    let cli = Cli::parse_args();

    match run(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let ctx = CalibrationContext::resolve(cli.fortress_home.as_deref())?;

    if !cli.yes {
        let stdin = std::io::stdin();
        let confirmed = confirm(cli.files.len(), &mut stdin.lock(), &mut std::io::stdout())?;
        if !confirmed {
            println!("quitting...");
            return Ok(());
        }
    }

    let compiler = FortressCompiler::new(ctx.executable.clone());
    let summary = Calibrator::new(&ctx, &compiler).calibrate_all(&cli.files);
    println!("{}", summary.message());
    Ok(())
}
