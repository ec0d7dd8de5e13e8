//! Error handling for strict JSON parsing.
//!
//! The permissive parser never fails. These errors are produced only by
//! [`crate::json::try_parse_json`], which walks the same token stream but
//! stops at the first construct the lenient path would have tolerated.
//!
//! Codes are stable so callers (and the `varjson check` command) can report
//! them numerically.

use thiserror::Error;

/// Problems reported by the strict parse layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ParseError {
    /// The input contains no `{` to start the root object (code 1)
    #[error("no root object found")]
    MissingRootObject,

    /// A string literal has no closing quote (code 2)
    #[error("unterminated string {0}")]
    UnterminatedString(String),

    /// A token appeared where the grammar does not allow it (code 3)
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    /// A number token is not a complete integer or float (code 4)
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// Input ended while an object or array was still open (code 5)
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// Containers are nested deeper than allowed (code 6)
    #[error("nesting depth {0} exceeds limit {1}")]
    NestingTooDeep(u64, u64),
}

impl ParseError {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ParseError::MissingRootObject => 1,
            ParseError::UnterminatedString(_) => 2,
            ParseError::UnexpectedToken(_) => 3,
            ParseError::InvalidNumber(_) => 4,
            ParseError::UnexpectedEnd => 5,
            ParseError::NestingTooDeep(_, _) => 6,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ParseError::MissingRootObject => "MissingRootObject",
            ParseError::UnterminatedString(_) => "UnterminatedString",
            ParseError::UnexpectedToken(_) => "UnexpectedToken",
            ParseError::InvalidNumber(_) => "InvalidNumber",
            ParseError::UnexpectedEnd => "UnexpectedEnd",
            ParseError::NestingTooDeep(_, _) => "NestingTooDeep",
        }
    }
}

/// Result type for strict parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
