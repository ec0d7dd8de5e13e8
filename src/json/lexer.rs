//! JSON tokenizer.
//!
//! Splits the input into lexical tokens without allocating: every token is a
//! slice of the source. A token is either a quoted string span (quotes
//! included), a single structural character, or a maximal run of bytes up to
//! the next delimiter. Classification is left to the parser.

use log::trace;

use super::options::ParseOptions;

/// Whitespace skipped between tokens (the C `isspace` set).
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// Bytes that end a bare token.
pub fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b',' | b':' | b'{' | b'}' | b'[' | b']') || is_whitespace(byte)
}

/// Cursor over a JSON source producing borrowed tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: usize,
    allow_comments: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned at the start of `source`.
    pub fn new(source: &'a str, options: &ParseOptions) -> Self {
        Self {
            source,
            pos: 0,
            allow_comments: options.allow_comments,
        }
    }

    /// Current byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns true once the cursor has reached the end of the source.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Advance past the first occurrence of `byte`.
    ///
    /// Returns false and moves to the end of input when `byte` never occurs.
    pub fn skip_past(&mut self, byte: u8) -> bool {
        let bytes = self.source.as_bytes();
        match bytes[self.pos..].iter().position(|&b| b == byte) {
            Some(offset) => {
                if offset > 0 {
                    trace!("skipped {} bytes before '{}'", offset, byte as char);
                }
                self.pos += offset + 1;
                true
            }
            None => {
                self.pos = bytes.len();
                false
            }
        }
    }

    /// Skip whitespace and, when enabled, comments.
    fn skip_trivia(&mut self) {
        let bytes = self.source.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            if is_whitespace(b) {
                self.pos += 1;
                continue;
            }

            if self.allow_comments && b == b'/' {
                let body = self.pos + 2;
                match bytes.get(self.pos + 1) {
                    Some(b'/') => {
                        // Stop on the newline; the next iteration skips it.
                        self.pos = self.source[body..]
                            .find('\n')
                            .map_or(bytes.len(), |offset| body + offset);
                        continue;
                    }
                    Some(b'*') => {
                        self.pos = self.source[body..]
                            .find("*/")
                            .map_or(bytes.len(), |offset| body + offset + 2);
                        continue;
                    }
                    _ => {}
                }
            }

            break;
        }
    }

    /// Read the next token, `None` at end of input.
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.skip_trivia();

        let bytes = self.source.as_bytes();
        let start = self.pos;
        let first = *bytes.get(start)?;

        let end = if first == b'"' {
            // A quote only closes the string when not preceded by a backslash.
            let mut i = start + 1;
            loop {
                match bytes.get(i) {
                    None => break i,
                    Some(b'"') if bytes[i - 1] != b'\\' => break i + 1,
                    Some(_) => i += 1,
                }
            }
        } else if is_delimiter(first) {
            start + 1
        } else {
            bytes[start..]
                .iter()
                .position(|&b| is_delimiter(b))
                .map_or(bytes.len(), |offset| start + offset)
        };

        self.pos = end;
        self.source.get(start..end)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
