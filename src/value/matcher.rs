//! Prefix matching of actual output against a stored expectation.

use super::escape::{Token, tokenize};
use regex::{Regex, RegexBuilder};

/// Compiled-size ceiling for expectation patterns; recorded outputs can be long.
const PATTERN_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Build the regex source for a stored expectation.
///
/// Literal text is escaped, `\n` matches a line break, `\\` matches two
/// backslashes, and `\ ` relaxes to ` +` so that column alignment in
/// diagnostics need not match exactly. The pattern is anchored at the start
/// but not at the end.
pub fn build_pattern(stored: &str) -> String {
    let mut pattern = String::from(r"\A");

    for token in tokenize(stored) {
        match token {
            Token::Text(text) => pattern.push_str(&regex::escape(text)),
            Token::Newline => pattern.push_str(r"\n"),
            Token::EscapedSpace => pattern.push_str(" +"),
            Token::EscapedBackslash => pattern.push_str(r"\\\\"),
            Token::Continuation => {}
        }
    }

    pattern
}

/// A compiled expectation.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile the matcher for a stored expectation.
    pub fn new(stored: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&build_pattern(stored))
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()?;
        Ok(Self { regex })
    }

    /// Whether `actual` starts with output matching the expectation.
    ///
    /// Output past the matched prefix is accepted.
    pub fn is_match(&self, actual: &str) -> bool {
        self.regex.is_match(actual)
    }
}
