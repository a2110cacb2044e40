//! Config loading, saving, and the lookups used during calibration.

use super::model::{Config, ConfigEntry};
use super::parser::parse_config;
use super::types::{Mode, TestsDir};
use super::writer::render_config;
use crate::error::{CalibrateError, Result};
use crate::fs::atomic_write_file;
use crate::normalize::HOME_PLACEHOLDER;
use std::path::Path;

/// Key naming the source file under test.
pub const SOURCE_KEY: &str = "tests";

/// Suffix of the key naming the tests directory.
pub const TESTS_DIR_SUFFIX: &str = "_TESTS_DIR";

/// Source extensions that are used as written.
const SOURCE_EXTENSIONS: [&str; 2] = [".fss", ".fsi"];

/// Extension appended when the `tests` value has none of the above.
const DEFAULT_SOURCE_EXTENSION: &str = ".fss";

impl Config {
    /// Load and parse a `.test` file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Entries in file order
    /// * `Err(CalibrateError::Io)` - The file could not be read
    /// * `Err(CalibrateError::Parse)` - The file is malformed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content =
            std::fs::read_to_string(path).map_err(|e| CalibrateError::io(path, e))?;

        parse_config(&content).map_err(|source| CalibrateError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the config back to `path` behind the fixed header.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), entries = self.len(), "writing test file");
        atomic_write_file(path, &render_config(self))
    }

    /// Whether any entry has this key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// The first entry with this key.
    pub fn first(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// The last entry with this key.
    pub fn last(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.iter().rev().find(|e| e.key == key)
    }

    /// Replace the value of the first entry with this key.
    ///
    /// Returns `false` (and changes nothing) when no entry has the key;
    /// calibration never adds keys that the test author did not write.
    pub fn replace_value(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.value = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Run mode, preferring `compile` when both flags are present.
    pub fn mode(&self) -> Option<Mode> {
        if self.contains_key(Mode::Compile.as_str()) {
            Some(Mode::Compile)
        } else if self.contains_key(Mode::Typecheck.as_str()) {
            Some(Mode::Typecheck)
        } else {
            None
        }
    }

    /// Source file named by the first `tests` key.
    ///
    /// A value ending in `.fss` or `.fsi` is used as is; anything else gets
    /// `.fss` appended. A bare or empty `tests` key yields `None`.
    pub fn source_file(&self) -> Option<String> {
        let value = self.first(SOURCE_KEY)?.value.as_deref()?;
        if value.is_empty() {
            return None;
        }

        if SOURCE_EXTENSIONS.iter().any(|ext| value.ends_with(ext)) {
            Some(value.to_string())
        } else {
            Some(format!("{}{}", value, DEFAULT_SOURCE_EXTENSION))
        }
    }

    /// Tests directory from the first `*_TESTS_DIR` key that has a value.
    ///
    /// `${FORTRESS_AUTOHOME}` inside the value is replaced by `home`.
    pub fn tests_dir(&self, home: &str) -> Option<TestsDir> {
        self.entries.iter().find_map(|e| {
            if !e.key.ends_with(TESTS_DIR_SUFFIX) {
                return None;
            }
            let value = e.value.as_deref()?;
            Some(TestsDir {
                key: e.key.clone(),
                path: value.replace(HOME_PLACEHOLDER, home),
            })
        })
    }

    /// Stored expected stdout and stderr for `mode`, last definition wins.
    ///
    /// A bare key counts as an empty expectation.
    pub fn expected_outputs(&self, mode: Mode) -> Result<(&str, &str)> {
        let out = self.expected_value(mode.out_key())?;
        let err = self.expected_value(mode.err_key())?;
        Ok((out, err))
    }

    fn expected_value(&self, key: String) -> Result<&str> {
        match self.last(&key) {
            Some(entry) => Ok(entry.value.as_deref().unwrap_or("")),
            None => Err(CalibrateError::MissingExpected { key }),
        }
    }
}
