//! Encoding captured output for storage, and decoding it back.

use super::escape::{Token, tokenize};
use std::borrow::Cow;

/// Encoded line break: `\n`, a continuation backslash, then a real break.
const ENCODED_NEWLINE: &str = "\\n\\\n";

/// Continuation marker: a backslash ending the physical line.
const CONTINUATION: &str = "\\\n";

/// Encode captured (already normalized) output for storage in a `.test` file.
///
/// Steps, in order:
/// 1. A line starting with a space gets a backslash inserted before it.
/// 2. Each line break becomes `\n` plus a continuation, so every logical
///    line of output sits on its own physical line.
/// 3. A continuation left dangling at the very end is trimmed.
/// 4. A multi-line result is prefixed with a continuation, so the key line
///    reads `KEY=\` and the output starts on the next line.
pub fn encode(value: &str) -> String {
    let mut encoded = value
        .split('\n')
        .map(escape_leading_space)
        .collect::<Vec<_>>()
        .join(ENCODED_NEWLINE);

    if encoded.ends_with(CONTINUATION) {
        encoded.truncate(encoded.len() - CONTINUATION.len());
    }

    if encoded.contains('\n') {
        encoded.insert_str(0, CONTINUATION);
    }

    encoded
}

/// Decode a stored value back to the normalized output it was encoded from.
///
/// Continuation markers vanish, `\n` becomes a line break and `\ ` a space.
/// Doubled backslashes stay doubled, matching normalized output.
pub fn decode(stored: &str) -> String {
    let mut decoded = String::with_capacity(stored.len());

    for token in tokenize(stored) {
        match token {
            Token::Text(text) => decoded.push_str(text),
            Token::Newline => decoded.push('\n'),
            Token::EscapedSpace => decoded.push(' '),
            Token::EscapedBackslash => decoded.push_str("\\\\"),
            Token::Continuation => {}
        }
    }

    decoded
}

fn escape_leading_space(line: &str) -> Cow<'_, str> {
    if line.starts_with(' ') {
        Cow::Owned(format!("\\{}", line))
    } else {
        Cow::Borrowed(line)
    }
}
