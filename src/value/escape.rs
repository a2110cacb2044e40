//! Tokenizer shared by the decoder and the matcher builder.

/// One lexical piece of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Token<'a> {
    /// Literal text, including any backslash not starting a known escape.
    Text(&'a str),
    /// `\n`: a line break in the captured output.
    Newline,
    /// `\ `: a space that started a line.
    EscapedSpace,
    /// `\\`: a backslash that was doubled during normalization.
    EscapedBackslash,
    /// A backslash followed by a physical line break; carries no content.
    Continuation,
}

/// Split a stored value into tokens, left to right.
pub(super) fn tokenize(stored: &str) -> Vec<Token<'_>> {
    let bytes = stored.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }

        let escape = match bytes.get(i + 1) {
            Some(b'n') => Some(Token::Newline),
            Some(b' ') => Some(Token::EscapedSpace),
            Some(b'\\') => Some(Token::EscapedBackslash),
            Some(b'\n') => Some(Token::Continuation),
            _ => None,
        };

        match escape {
            Some(token) => {
                if text_start < i {
                    tokens.push(Token::Text(&stored[text_start..i]));
                }
                tokens.push(token);
                i += 2;
                text_start = i;
            }
            None => i += 1,
        }
    }

    if text_start < bytes.len() {
        tokens.push(Token::Text(&stored[text_start..]));
    }

    tokens
}
