//! Config and entry definitions.

/// One `KEY` or `KEY=VALUE` definition.
///
/// `value` holds the stored text exactly as it sits in the file once
/// continuation lines are joined; escapes such as `\n` are not decoded here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    /// `None` for a bare flag key.
    pub value: Option<String>,
}

impl ConfigEntry {
    /// A bare flag such as `compile`.
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// A `KEY=VALUE` pair.
    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

/// Ordered entries of one `.test` file.
///
/// File order is preserved and keys are not required to be unique. Each
/// lookup in `operations` documents whether it takes the first or the last
/// entry for a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub(super) entries: Vec<ConfigEntry>,
}

impl Config {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from entries in file order.
    pub fn from_entries(entries: Vec<ConfigEntry>) -> Self {
        Self { entries }
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    /// Append an entry.
    pub fn push(&mut self, entry: ConfigEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
