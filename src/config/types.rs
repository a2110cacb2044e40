//! Value types derived from a parsed `.test` file.

use std::fmt;

/// Run mode of the compiler, selected by a bare `compile` or `typecheck` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `fortress compile <source>`
    Compile,
    /// `fortress typecheck <source>`
    Typecheck,
}

impl Mode {
    /// The key that selects this mode, which is also the compiler subcommand.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Compile => "compile",
            Mode::Typecheck => "typecheck",
        }
    }

    /// Key holding the expected stdout for this mode.
    pub fn out_key(self) -> String {
        format!("{}_out_equals", self.as_str())
    }

    /// Key holding the expected stderr for this mode.
    pub fn err_key(self) -> String {
        format!("{}_err_equals", self.as_str())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tests directory named by a `*_TESTS_DIR` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestsDir {
    /// The key name, e.g. `STATIC_TESTS_DIR`.
    pub key: String,
    /// The directory with the installation-root token already substituted.
    pub path: String,
}

impl TestsDir {
    /// Placeholder written into outputs in place of [`TestsDir::path`].
    pub fn placeholder(&self) -> String {
        format!("${{{}}}", self.key)
    }
}
