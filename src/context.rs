//! Installation context resolution for calibrate-tests.
//!
//! Everything that is process-wide is resolved once at startup into a
//! [`CalibrationContext`] and handed to the driver: the installation root,
//! the `fortress` executable under it, and the library source path the
//! compiler reports for `FORTRESS_SOURCE_PATH`.

use crate::compiler::{Compiler, FortressCompiler};
use crate::error::{CalibrateError, Result};
use crate::normalize::SOURCE_PATH_NAME;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Environment variable naming the installation root.
pub const HOME_ENV_VAR: &str = "FORTRESS_HOME";

/// Location of the compiler executable relative to the installation root.
pub const EXECUTABLE_RELATIVE_PATH: &str = "bin/fortress";

/// Resolved process-wide values for one calibration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationContext {
    /// Canonical installation root.
    pub fortress_home: PathBuf,

    /// `{fortress_home}/bin/fortress`.
    pub executable: PathBuf,

    /// Expansion of `FORTRESS_SOURCE_PATH`, trailing newlines removed.
    pub source_path: String,
}

impl CalibrationContext {
    /// Resolve the context for the installation at `home`.
    ///
    /// # Returns
    ///
    /// * `Ok(CalibrationContext)` - Root, executable, and source path resolved
    /// * `Err(CalibrateError::Startup)` - No root given, the root does not
    ///   exist, there is no executable, or the executable cannot be run
    pub fn resolve(home: Option<&Path>) -> Result<Self> {
        let (fortress_home, executable) = locate_installation(home)?;
        let compiler = FortressCompiler::new(&executable);
        Self::with_compiler(fortress_home, executable, &compiler)
    }

    /// Build the context, asking `compiler` for the source path.
    pub fn with_compiler<C: Compiler>(
        fortress_home: PathBuf,
        executable: PathBuf,
        compiler: &C,
    ) -> Result<Self> {
        let source_path = compiler
            .expand(SOURCE_PATH_NAME)
            .map_err(|e| CalibrateError::Startup(format!("failed to expand {}: {}", SOURCE_PATH_NAME, e)))?;

        tracing::debug!(
            home = %fortress_home.display(),
            source_path = %source_path,
            "resolved calibration context"
        );

        Ok(Self {
            fortress_home,
            executable,
            source_path,
        })
    }

    /// The installation root as text, for substitution into outputs and values.
    pub fn home_str(&self) -> Cow<'_, str> {
        self.fortress_home.to_string_lossy()
    }
}

/// Canonicalize the installation root and check for the executable.
pub fn locate_installation(home: Option<&Path>) -> Result<(PathBuf, PathBuf)> {
    let home = home.ok_or_else(|| {
        CalibrateError::Startup(format!("{} is not set", HOME_ENV_VAR))
    })?;

    let fortress_home = home.canonicalize().map_err(|e| {
        CalibrateError::Startup(format!(
            "cannot resolve {} '{}': {}",
            HOME_ENV_VAR,
            home.display(),
            e
        ))
    })?;

    let executable = fortress_home.join(EXECUTABLE_RELATIVE_PATH);
    if !executable.is_file() {
        return Err(CalibrateError::Startup(format!(
            "no fortress executable at {}",
            executable.display()
        )));
    }

    Ok((fortress_home, executable))
}
