//! Calibration driver.
//!
//! For each `.test` file: parse it, resolve the mode, source file and tests
//! directory, run the compiler, normalize both output streams and compare
//! them with the stored expectations. A stream that no longer matches has
//! its expectation replaced with the encoded actual output and the file is
//! rewritten. Files are processed one at a time, in the order given; a
//! failure in one file is reported and does not stop the batch.

mod compare;
mod confirm;

#[cfg(test)]
mod tests;

pub use compare::{Comparison, compare_outputs};
pub use confirm::confirm;

use crate::compiler::Compiler;
use crate::config::Config;
use crate::context::CalibrationContext;
use crate::error::{CalibrateError, Result};
use crate::normalize::{PlaceholderMap, find_unix_path, normalize_output};
use crate::value::encode;
use std::path::Path;

/// Terminal state of one test file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Output matched; the file was not touched.
    Unchanged,
    /// At least one expectation was replaced and the file rewritten.
    Updated,
    /// The file could not be calibrated; the error was reported.
    Failed,
}

/// Counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Updated => self.updated += 1,
            Outcome::Failed => self.failed += 1,
        }
    }

    /// The closing line printed after a batch.
    pub fn message(&self) -> String {
        format!("* updated {} {}", self.updated, plural(self.updated))
    }
}

/// `test` or `tests`.
pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 { "test" } else { "tests" }
}

/// Runs calibration against one installation.
pub struct Calibrator<'a, C: Compiler> {
    ctx: &'a CalibrationContext,
    compiler: &'a C,
}

impl<'a, C: Compiler> Calibrator<'a, C> {
    pub fn new(ctx: &'a CalibrationContext, compiler: &'a C) -> Self {
        Self { ctx, compiler }
    }

    /// Calibrate every file in order and return the counts.
    pub fn calibrate_all<P: AsRef<Path>>(&self, files: &[P]) -> Summary {
        let mut summary = Summary::default();

        for file in files {
            let path = file.as_ref();
            println!("calibrating {}...", path.display());

            let outcome = match self.calibrate_file(path) {
                Ok(outcome) => outcome,
                Err(e) => {
                    eprintln!("Error: {}: {}", path.display(), e);
                    Outcome::Failed
                }
            };

            tracing::debug!(path = %path.display(), ?outcome, "calibrated");
            summary.record(outcome);
        }

        summary
    }

    /// Calibrate a single test file.
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome::Unchanged)` - Both streams match
    /// * `Ok(Outcome::Updated)` - The file was rewritten
    /// * `Err(_)` - Parsing, key resolution, the compiler, comparison or the
    ///   write failed; the file is left as it was unless the write itself failed
    pub fn calibrate_file(&self, path: &Path) -> Result<Outcome> {
        let mut config = Config::load(path)?;

        let mode = config.mode().ok_or(CalibrateError::MissingMode)?;
        let source = config.source_file().ok_or(CalibrateError::MissingSource)?;
        let home = self.ctx.home_str();
        let tests_dir = config
            .tests_dir(&home)
            .ok_or(CalibrateError::MissingTestsDir)?;

        let output = self.compiler.run(mode, &source)?;

        let placeholders = PlaceholderMap::for_test(&home, &self.ctx.source_path, &tests_dir);
        let stdout = normalize_output(&output.stdout, &placeholders);
        let stderr = normalize_output(&output.stderr, &placeholders);

        let comparison = compare_outputs(&config, mode, &stdout, &stderr)?;
        if comparison.all_match() {
            return Ok(Outcome::Unchanged);
        }

        if !comparison.stdout_matches {
            tracing::debug!(path = %path.display(), "stdout differs");
            replace_expectation(&mut config, &mode.out_key(), &stdout);
        }
        if !comparison.stderr_matches {
            tracing::debug!(path = %path.display(), "stderr differs");
            replace_expectation(&mut config, &mode.err_key(), &stderr);
        }

        config.save(path)?;
        println!("* wrote out new {}", path.display());
        Ok(Outcome::Updated)
    }
}

/// Store `normalized` under `key`, warning if it still carries an absolute path.
fn replace_expectation(config: &mut Config, key: &str, normalized: &str) {
    if let Some(leaked) = find_unix_path(normalized) {
        eprintln!("* WARNING! possible unix path detected in output: {}", leaked);
    }
    config.replace_value(key, encode(normalized));
}
