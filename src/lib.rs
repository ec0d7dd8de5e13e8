//! Variant JSON - dynamically-typed values and a permissive JSON codec.
//!
//! A [`Variant`] holds one of a closed set of kinds (scalars, typed arrays,
//! a sequence of variants, or a string-keyed dictionary of variants). The
//! [`json`] module turns JSON text into a [`Dictionary`] of variants and
//! back.
//!
//! # Architecture
//!
//! - [`variant`] - The value type, its kinds and typed read-back
//! - [`json`] - Tokenizer, parser and writer
//! - [`error`] - Errors reported by strict parsing
//!
//! # Leniency
//!
//! The default parse path accepts malformed input and builds whatever tree
//! it can; mismatched reads from a variant return defaults. Use
//! [`json::try_parse_json`] or [`Variant::try_read`] where failures must be
//! visible.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod error;
pub mod json;
pub mod variant;

// Re-export commonly used types
pub use error::{ParseError, ParseResult};
pub use json::{parse_json, to_json, try_parse_json, ParseOptions, Style};
pub use variant::{Dictionary, FromVariant, Handle, Kind, Variant};
