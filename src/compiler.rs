//! Compiler runner for calibrate-tests.
//!
//! The compiler is an opaque command: `<exe> <mode> <source>` for a test run,
//! and `<exe> expand <NAME>` to read a configuration constant. Both block
//! until the process exits. All invocations go through the [`Compiler`]
//! trait so the driver can be exercised without a real installation.

use crate::config::Mode;
use crate::error::{CalibrateError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Captured output of one compiler run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOutput {
    /// Standard output, untrimmed.
    pub stdout: String,
    /// Standard error, untrimmed.
    pub stderr: String,
}

impl CompilerOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// The external compiler as seen by the calibration driver.
pub trait Compiler {
    /// Run `mode` on `source` and capture both streams.
    ///
    /// A non-zero exit status is not an error: failing compilations are
    /// exactly what many tests record.
    fn run(&self, mode: Mode, source: &str) -> Result<CompilerOutput>;

    /// Expand a configuration constant such as `FORTRESS_SOURCE_PATH`.
    fn expand(&self, name: &str) -> Result<String>;
}

/// The `fortress` executable of an installation.
#[derive(Debug, Clone)]
pub struct FortressCompiler {
    executable: PathBuf,
}

impl FortressCompiler {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn invoke(&self, args: &[&str]) -> Result<CompilerOutput> {
        tracing::debug!(executable = %self.executable.display(), ?args, "running compiler");

        let output = Command::new(&self.executable)
            .args(args)
            .output()
            .map_err(|e| {
                CalibrateError::Compiler(format!(
                    "failed to execute {} {}: {}",
                    self.executable.display(),
                    args.join(" "),
                    e
                ))
            })?;

        tracing::debug!(status = ?output.status.code(), "compiler exited");
        Ok(CompilerOutput::from_output(&output))
    }
}

impl Compiler for FortressCompiler {
    fn run(&self, mode: Mode, source: &str) -> Result<CompilerOutput> {
        self.invoke(&[mode.as_str(), source])
    }

    fn expand(&self, name: &str) -> Result<String> {
        let output = self.invoke(&["expand", name])?;
        Ok(output.stdout.trim_end_matches('\n').to_string())
    }
}
