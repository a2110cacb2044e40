//! Line-oriented parser for `.test` files.
//!
//! The parser is a two-state machine. While awaiting a key, blank lines and
//! `#` comments are skipped and every other line must be `KEY` or
//! `KEY=VALUE`. A value whose line ends in an unescaped backslash opens the
//! accumulating state, in which every physical line is taken verbatim (minus
//! its continuation backslash) until a line without one closes the value.

use super::model::{Config, ConfigEntry};
use thiserror::Error;

/// A malformed `.test` file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based physical line number.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A line outside any value that is not a definition.
    #[error("expected `KEY` or `KEY=VALUE`, found `{0}`")]
    MalformedLine(String),

    /// End of input reached inside a continued value.
    #[error("value of `{0}` is not closed before end of file")]
    UnterminatedValue(String),
}

enum State {
    AwaitingKey,
    AccumulatingValue {
        key: String,
        content: String,
        start_line: usize,
    },
}

/// Parse the text of a `.test` file into its ordered entries.
///
/// # Returns
///
/// * `Ok(Config)` - Entries in file order, values with continuations joined
/// * `Err(ParseError)` - The first malformed line, or the line that opened a
///   value still unterminated at end of input
pub fn parse_config(input: &str) -> Result<Config, ParseError> {
    let mut entries = Vec::new();
    let mut state = State::AwaitingKey;

    for (index, raw) in input.lines().enumerate() {
        let line_number = index + 1;

        state = match state {
            State::AwaitingKey => {
                let line = raw.trim_start();
                if line.trim_end().is_empty() || line.starts_with('#') {
                    State::AwaitingKey
                } else {
                    let (key, value) = split_definition(line).ok_or_else(|| ParseError {
                        line: line_number,
                        kind: ParseErrorKind::MalformedLine(line.trim_end().to_string()),
                    })?;

                    match value.and_then(strip_continuation) {
                        Some(seed) => State::AccumulatingValue {
                            key: key.to_string(),
                            content: seed.to_string(),
                            start_line: line_number,
                        },
                        None => {
                            entries.push(ConfigEntry {
                                key: key.to_string(),
                                value: value.map(str::to_string),
                            });
                            State::AwaitingKey
                        }
                    }
                }
            }

            State::AccumulatingValue {
                key,
                mut content,
                start_line,
            } => match strip_continuation(raw) {
                Some(part) => {
                    content.push_str(part);
                    State::AccumulatingValue {
                        key,
                        content,
                        start_line,
                    }
                }
                None => {
                    content.push_str(raw);
                    entries.push(ConfigEntry::pair(key, content));
                    State::AwaitingKey
                }
            },
        };
    }

    if let State::AccumulatingValue {
        key, start_line, ..
    } = state
    {
        return Err(ParseError {
            line: start_line,
            kind: ParseErrorKind::UnterminatedValue(key),
        });
    }

    Ok(Config::from_entries(entries))
}

/// Split `KEY` or `KEY=VALUE`; the key must be non-empty word characters.
///
/// A value is kept byte for byte, trailing whitespace included, since
/// calibrated output may end in spaces.
fn split_definition(line: &str) -> Option<(&str, Option<&str>)> {
    let (key, value) = match line.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (line.trim_end(), None),
    };

    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    if key.is_empty() || !key.chars().all(is_word) {
        return None;
    }

    Some((key, value))
}

/// Strip a continuation backslash, if the line has one.
///
/// A line continues only when it ends in an odd number of backslashes; an
/// even run is a sequence of escaped backslashes and closes the value.
fn strip_continuation(line: &str) -> Option<&str> {
    let trailing = line.bytes().rev().take_while(|&b| b == b'\\').count();
    if trailing % 2 == 1 {
        Some(&line[..line.len() - 1])
    } else {
        None
    }
}
