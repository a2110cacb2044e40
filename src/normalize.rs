//! Output normalization for portable expectations.
//!
//! Compiler output embeds absolute paths that differ per checkout. Before
//! output is compared or stored, backslashes and double quotes are escaped
//! and every known volatile path is replaced with a `${NAME}` placeholder.
//! Nested paths are substituted before the installation root so that a
//! tests directory under the root never ends up half-replaced as
//! `${FORTRESS_AUTOHOME}/...`.

use crate::config::TestsDir;
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder for the installation root.
pub const HOME_PLACEHOLDER: &str = "${FORTRESS_AUTOHOME}";

/// Name of the configuration constant holding the library source path.
pub const SOURCE_PATH_NAME: &str = "FORTRESS_SOURCE_PATH";

/// Static regex for text that looks like an absolute unix path.
static UNIX_PATH_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^|\s)((?:/[^/\s]+)+)").ok());

/// One path and the placeholder that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub path: String,
    pub placeholder: String,
}

impl Substitution {
    pub fn new(path: impl Into<String>, name: &str) -> Self {
        Self {
            path: path.into(),
            placeholder: format!("${{{}}}", name),
        }
    }
}

/// The volatile paths of one calibration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMap {
    nested: Vec<Substitution>,
    root: Substitution,
}

impl PlaceholderMap {
    /// A map that only knows the installation root.
    pub fn new(home: impl Into<String>) -> Self {
        Self {
            nested: Vec::new(),
            root: Substitution {
                path: home.into(),
                placeholder: HOME_PLACEHOLDER.to_string(),
            },
        }
    }

    /// The map used for one test file: its tests directory and the
    /// library source path, both applied before the root.
    pub fn for_test(home: &str, source_path: &str, tests_dir: &TestsDir) -> Self {
        Self::new(home)
            .with_path(&tests_dir.path, &tests_dir.key)
            .with_path(source_path, SOURCE_PATH_NAME)
    }

    /// Add a path to substitute ahead of the installation root.
    pub fn with_path(mut self, path: impl Into<String>, name: &str) -> Self {
        self.nested.push(Substitution::new(path, name));
        self
    }

    /// Substitutions in application order.
    ///
    /// Nested paths come first, longest first (ties keep insertion order),
    /// then the root. Empty paths are dropped.
    pub fn substitutions(&self) -> Vec<&Substitution> {
        let mut ordered: Vec<&Substitution> = self.nested.iter().collect();
        ordered.sort_by(|a, b| b.path.len().cmp(&a.path.len()));
        ordered.push(&self.root);
        ordered.retain(|s| !s.path.is_empty());
        ordered
    }

    /// Replace every known path in already-escaped text.
    pub fn apply(&self, escaped: &str) -> String {
        let mut text = escaped.to_string();
        for sub in self.substitutions() {
            // Paths are matched in their escaped form, as they appear in the text.
            let needle = escape_output(&sub.path);
            text = text.replace(&needle, &sub.placeholder);
        }
        text
    }
}

/// Escape backslashes, then double quotes.
pub fn escape_output(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape captured output and substitute placeholders for volatile paths.
pub fn normalize_output(raw: &str, map: &PlaceholderMap) -> String {
    map.apply(&escape_output(raw))
}

/// The first substring of `text` that looks like an absolute unix path.
///
/// Used to warn when a calibrated expectation would tie a test to one
/// machine's layout.
pub fn find_unix_path(text: &str) -> Option<&str> {
    let regex = UNIX_PATH_REGEX.as_ref()?;
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
