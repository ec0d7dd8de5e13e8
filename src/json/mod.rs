//! JSON codec over [`Variant`](crate::Variant) trees.
//!
//! The codec is deliberately permissive: parsing never fails, and the root
//! of every document is a [`Dictionary`](crate::Dictionary).
//!
//! # Architecture
//!
//! - [`lexer`] - Borrowing tokenizer
//! - [`parser`] - Container-driven recursive descent, lenient and strict
//! - [`writer`] - Compact and tab-indented output
//! - [`options`] - Parse configuration
//!
//! # Example
//!
//! ```
//! use variant_json::json::{parse_json, to_json};
//! use variant_json::Variant;
//!
//! let root = parse_json(r#"{"a":1,"b":[true,false,null]}"#);
//! assert_eq!(root["a"], Variant::Int(1));
//!
//! assert_eq!(to_json(&root, false), r#"{"a":1,"b":[true,false,null]}"#);
//! ```

pub mod lexer;
pub mod options;
pub mod parser;
pub mod writer;

pub use lexer::Tokenizer;
pub use options::ParseOptions;
pub use parser::{parse_json, parse_json_into, parse_json_with, try_parse_json, Parser};
pub use writer::{to_json, to_json_with, write_value, Style};
