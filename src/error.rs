//! Error types for the calibrate-tests CLI.
//!
//! Uses thiserror for derive macros. Every message names what went wrong in
//! terms a person fixing a `.test` file can act on.

use crate::config::ParseError;
use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for calibration.
///
/// `Startup` and `Cancelled` abort the whole run. Everything else is
/// recovered per test file by the driver, which reports it and moves on.
#[derive(Error, Debug)]
pub enum CalibrateError {
    /// The environment is not usable (no installation root, no executable).
    #[error("{0}")]
    Startup(String),

    /// The user stopped the run before it started.
    #[error("stopped")]
    Cancelled,

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The test file is not in the key/value continuation format.
    #[error("error parsing test file: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// No usable `tests` key.
    #[error("error getting source file: no `tests` key")]
    MissingSource,

    /// Neither `compile` nor `typecheck` is present.
    #[error("error getting run mode: no `compile` or `typecheck` key")]
    MissingMode,

    /// No usable `*_TESTS_DIR` key.
    #[error("error locating tests dir")]
    MissingTestsDir,

    /// An expected-output key for the active mode is absent.
    #[error("error comparing output: missing `{key}`")]
    MissingExpected { key: String },

    /// The stored expectation could not be turned into a matcher.
    #[error("error comparing output: {0}")]
    Pattern(String),

    /// The compiler could not be run at all.
    #[error("compiler invocation failed: {0}")]
    Compiler(String),
}

impl CalibrateError {
    /// Returns the process exit code for this error.
    ///
    /// Only errors that abort the run reach `main`, and all of them map to
    /// the same code; per-file errors never change the exit status.
    pub fn exit_code(&self) -> i32 {
        exit_codes::FAILURE
    }

    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CalibrateError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for calibration operations.
pub type Result<T> = std::result::Result<T, CalibrateError>;
