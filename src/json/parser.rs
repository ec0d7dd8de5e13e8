//! Recursive-descent JSON parser.
//!
//! Parsing is driven by the container being filled rather than by a grammar
//! state machine. Inside a dictionary, string tokens alternate between key
//! and value; inside an array every token is a value. `}` or `]` ends the
//! current level without checking that it matches.
//!
//! The same parser runs in two modes. Lenient mode (the default) accepts
//! anything: unknown words are skipped, literals are recognized by their
//! first letter, unparsable numbers become zero. Strict mode walks the same
//! path but reports the first construct lenient mode would have tolerated.

use log::{debug, trace};

use super::lexer::Tokenizer;
use super::options::ParseOptions;
use crate::error::{ParseError, ParseResult};
use crate::variant::{Dictionary, Variant};

/// The container a recursion level appends into.
enum Container<'c> {
    Dictionary(&'c mut Dictionary),
    Array(&'c mut Vec<Variant>),
}

/// What strict mode accepts next inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Key,
    Colon,
    Value,
    Comma,
}

/// JSON parser over a borrowed source.
pub struct Parser<'a> {
    tokens: Tokenizer<'a>,
    strict: bool,
    max_depth: u64,
    depth: u64,
}

impl<'a> Parser<'a> {
    /// Create a lenient parser.
    pub fn new(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            tokens: Tokenizer::new(input, options),
            strict: false,
            max_depth: options.max_nesting_depth,
            depth: 0,
        }
    }

    /// Create a parser that reports malformed input.
    pub fn strict(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            strict: true,
            ..Self::new(input, options)
        }
    }

    /// Skip to the first `{` and parse the object it opens into `root`.
    ///
    /// Entries are added to whatever `root` already holds. A lenient parser
    /// never returns an error.
    pub fn parse_root(&mut self, root: &mut Dictionary) -> ParseResult<()> {
        if !self.tokens.skip_past(b'{') {
            return self.require(false, || ParseError::MissingRootObject);
        }
        self.nested(Container::Dictionary(root)).map(|_| ())
    }

    /// Turn a rejected check into an error in strict mode only.
    fn require(&self, ok: bool, error: impl FnOnce() -> ParseError) -> ParseResult<()> {
        if ok || !self.strict {
            return Ok(());
        }
        let error = error();
        trace!("strict parse rejected input: {}", error);
        Err(error)
    }

    /// Enter one nesting level and fill `container` until its closer.
    ///
    /// Past the depth limit a strict parser fails. A lenient one skips the
    /// subtree and returns false, leaving `container` untouched.
    fn nested(&mut self, container: Container<'_>) -> ParseResult<bool> {
        let depth = self.depth + 1;
        let max_depth = self.max_depth;
        if depth > max_depth {
            self.require(false, || ParseError::NestingTooDeep(depth, max_depth))?;
            trace!("skipping subtree nested past depth {}", max_depth);
            self.skip_subtree();
            return Ok(false);
        }

        self.depth = depth;
        self.fill(container)?;
        self.depth -= 1;
        Ok(true)
    }

    /// Consume tokens up to the closer of the level just opened.
    fn skip_subtree(&mut self) {
        let mut open = 1usize;
        while let Some(token) = self.tokens.next_token() {
            match token.as_bytes().first() {
                Some(b'{' | b'[') => open += 1,
                Some(b'}' | b']') => {
                    open -= 1;
                    if open == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    /// Consume tokens into `container` until a closer or end of input.
    fn fill(&mut self, mut container: Container<'_>) -> ParseResult<()> {
        let is_dictionary = matches!(container, Container::Dictionary(_));
        let opening = if is_dictionary { Slot::Key } else { Slot::Value };

        let mut current_key = String::new();
        let mut expecting_key = is_dictionary;
        let mut slot = opening;
        let mut count = 0usize;

        while let Some(token) = self.tokens.next_token() {
            let Some(&first) = token.as_bytes().first() else {
                continue;
            };

            let value = match first {
                b'"' => {
                    self.require(is_terminated(token), || {
                        ParseError::UnterminatedString(token.to_string())
                    })?;
                    let text = unescape(token);
                    if expecting_key {
                        self.require(slot == Slot::Key, || unexpected(token))?;
                        current_key = text;
                        expecting_key = false;
                        slot = Slot::Colon;
                        continue;
                    }
                    Variant::String(text)
                }
                b't' => {
                    self.require(token == "true", || unexpected(token))?;
                    Variant::Bool(true)
                }
                b'f' => {
                    self.require(token == "false", || unexpected(token))?;
                    Variant::Bool(false)
                }
                b'n' => {
                    self.require(token == "null", || unexpected(token))?;
                    Variant::null()
                }
                b'0'..=b'9' | b'-' => {
                    self.require(is_valid_number(token), || {
                        ParseError::InvalidNumber(token.to_string())
                    })?;
                    parse_number(token)
                }
                b'{' => {
                    self.require(slot == Slot::Value, || unexpected(token))?;
                    let mut map = Dictionary::new();
                    if self.nested(Container::Dictionary(&mut map))? {
                        Variant::Dictionary(map)
                    } else {
                        Variant::null()
                    }
                }
                b'[' => {
                    self.require(slot == Slot::Value, || unexpected(token))?;
                    let mut items = Vec::new();
                    if self.nested(Container::Array(&mut items))? {
                        Variant::VariantArray(items)
                    } else {
                        Variant::null()
                    }
                }
                b'}' | b']' => {
                    let matches_container = (first == b'}') == is_dictionary;
                    let closable = slot == Slot::Comma || (slot == opening && count == 0);
                    self.require(matches_container && closable, || unexpected(token))?;
                    return Ok(());
                }
                b':' => {
                    self.require(slot == Slot::Colon, || unexpected(token))?;
                    slot = Slot::Value;
                    continue;
                }
                b',' => {
                    self.require(slot == Slot::Comma, || unexpected(token))?;
                    slot = opening;
                    continue;
                }
                _ => {
                    self.require(false, || unexpected(token))?;
                    continue;
                }
            };

            // Containers were checked before recursing.
            if first != b'{' && first != b'[' {
                self.require(slot == Slot::Value, || unexpected(token))?;
            }

            match &mut container {
                Container::Dictionary(map) => {
                    map.insert(current_key.clone(), value);
                    expecting_key = true;
                }
                Container::Array(items) => {
                    items.push(value);
                    expecting_key = false;
                }
            }
            slot = Slot::Comma;
            count += 1;
        }

        self.require(false, || ParseError::UnexpectedEnd)
    }
}

fn unexpected(token: &str) -> ParseError {
    ParseError::UnexpectedToken(token.to_string())
}

/// A string token is closed when it ends in a quote that is not escaped.
fn is_terminated(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() >= 2 && bytes[bytes.len() - 1] == b'"' && bytes[bytes.len() - 2] != b'\\'
}

/// Strip the surrounding quotes and unescape `\"`.
///
/// No other escape sequence is interpreted; `\\`, `\n` and friends are kept
/// verbatim.
pub fn unescape(token: &str) -> String {
    let bytes = token.as_bytes();
    let inner = if bytes.len() >= 2 {
        &bytes[1..bytes.len() - 1]
    } else {
        &[][..]
    };

    let mut out = Vec::with_capacity(inner.len());
    for (i, &b) in inner.iter().enumerate() {
        if b == b'\\' && inner.get(i + 1) == Some(&b'"') {
            continue;
        }
        out.push(b);
    }

    // Dropping the last byte of an unterminated token can split a character.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Numbers containing `.` or a lowercase `e` are floats.
fn is_float_token(token: &str) -> bool {
    token.bytes().any(|b| b == b'.' || b == b'e')
}

/// Length of the leading run of ASCII digits in `bytes`.
fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Longest prefix of `token` that reads as an integer.
fn integer_prefix(token: &str) -> &str {
    let bytes = token.as_bytes();
    let sign = usize::from(bytes.first() == Some(&b'-'));
    &token[..sign + digit_run(&bytes[sign..])]
}

/// Longest prefix of `token` that reads as a float.
fn float_prefix(token: &str) -> &str {
    let bytes = token.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));

    let whole = digit_run(&bytes[end..]);
    end += whole;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digit_run(&bytes[end + 1..]);
        if whole > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole == 0 && fraction == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let digits = digit_run(&bytes[exponent..]);
        if digits > 0 {
            end = exponent + digits;
        }
    }

    &token[..end]
}

/// Read a float, `None` when it is malformed or out of `f64` range.
fn finite_float(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Decode a number token, reading the longest valid prefix.
///
/// A token with no valid prefix, or a value out of `i64` / `f64` range,
/// reads as zero.
pub fn parse_number(token: &str) -> Variant {
    if is_float_token(token) {
        Variant::Float(finite_float(float_prefix(token)).unwrap_or(0.0))
    } else {
        Variant::Int(integer_prefix(token).parse().unwrap_or(0))
    }
}

/// Digits on both sides of the decimal point, as JSON requires.
fn has_json_mantissa(token: &str) -> bool {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    let mantissa = unsigned
        .split(|c| c == 'e' || c == 'E')
        .next()
        .unwrap_or_default();
    match mantissa.split_once('.') {
        Some((whole, fraction)) => !whole.is_empty() && !fraction.is_empty(),
        None => !mantissa.is_empty(),
    }
}

/// Whether the whole token is a JSON number that parses without loss of
/// range.
fn is_valid_number(token: &str) -> bool {
    if is_float_token(token) {
        float_prefix(token) == token && has_json_mantissa(token) && finite_float(token).is_some()
    } else {
        integer_prefix(token) == token && token.parse::<i64>().is_ok()
    }
}

/// Parse JSON text into a new dictionary with default options.
///
/// Everything before the first `{` is ignored. Input without a `{` yields
/// an empty dictionary. Containers nested deeper than
/// [`DEFAULT_MAX_NESTING_DEPTH`](super::options::DEFAULT_MAX_NESTING_DEPTH)
/// are replaced by `null`.
pub fn parse_json(input: &str) -> Dictionary {
    parse_json_with(input, &ParseOptions::standard())
}

/// Parse JSON text into a new dictionary with custom options.
pub fn parse_json_with(input: &str, options: &ParseOptions) -> Dictionary {
    let mut root = Dictionary::new();
    parse_json_into(input, options, &mut root);
    root
}

/// Parse JSON text in place into a caller-owned dictionary.
///
/// Parsed entries are added to `root`; existing keys are overwritten.
pub fn parse_json_into(input: &str, options: &ParseOptions, root: &mut Dictionary) {
    debug!("parsing {} bytes of JSON", input.len());
    let mut parser = Parser::new(input, options);
    if let Err(error) = parser.parse_root(root) {
        // Lenient parsers have no rejecting checks.
        debug!("lenient parse stopped early: {}", error);
    }
    debug!("parsed root object with {} keys", root.len());
}

/// Parse JSON text, reporting the first malformed construct.
///
/// Accepts exactly what [`parse_json`] builds from well-formed input, so a
/// successful result equals the lenient one. Duplicate keys are not
/// detected; the last value wins.
pub fn try_parse_json(input: &str, options: &ParseOptions) -> ParseResult<Dictionary> {
    debug!("strict parsing {} bytes of JSON", input.len());
    let mut root = Dictionary::new();
    Parser::strict(input, options).parse_root(&mut root)?;
    Ok(root)
}
