//! Comparison of normalized output against stored expectations.

use crate::config::{Config, Mode};
use crate::error::{CalibrateError, Result};
use crate::value::Matcher;

/// Per-stream result of comparing one run against its expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub stdout_matches: bool,
    pub stderr_matches: bool,
}

impl Comparison {
    pub fn all_match(&self) -> bool {
        self.stdout_matches && self.stderr_matches
    }
}

/// Compare normalized stdout and stderr against `<mode>_out_equals` and
/// `<mode>_err_equals`.
///
/// # Returns
///
/// * `Ok(Comparison)` - Each stream judged independently
/// * `Err(CalibrateError::MissingExpected)` - An expectation key is absent
/// * `Err(CalibrateError::Pattern)` - An expectation could not be compiled
pub fn compare_outputs(
    config: &Config,
    mode: Mode,
    stdout: &str,
    stderr: &str,
) -> Result<Comparison> {
    let (expected_out, expected_err) = config.expected_outputs(mode)?;

    Ok(Comparison {
        stdout_matches: matches(expected_out, stdout)?,
        stderr_matches: matches(expected_err, stderr)?,
    })
}

fn matches(expected: &str, actual: &str) -> Result<bool> {
    let matcher = Matcher::new(expected).map_err(|e| CalibrateError::Pattern(e.to_string()))?;
    Ok(matcher.is_match(actual))
}
