//! Parser configuration.
//!
//! A small `Copy` struct with `const` presets. Everything defaults to plain
//! JSON behavior.

use serde::{Deserialize, Serialize};

/// Default object/array nesting limit.
pub const DEFAULT_MAX_NESTING_DEPTH: u64 = 128;

/// Options controlling tokenization and nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Skip `//` line comments and `/* */` block comments between tokens.
    pub allow_comments: bool,
    /// Maximum object/array nesting, counting the root object as 1.
    ///
    /// Strict parsing fails past this depth. The permissive parser skips
    /// any deeper container and stores `null` in its place. Parsing
    /// recurses once per level, so very large values risk the stack.
    pub max_nesting_depth: u64,
}

impl ParseOptions {
    /// Plain JSON: no comments, default depth limit.
    pub const fn standard() -> Self {
        Self {
            allow_comments: false,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// JSON with comments and a generous depth limit, for hand-written files.
    pub const fn relaxed() -> Self {
        Self {
            allow_comments: true,
            max_nesting_depth: 256,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_options() {
        let options = ParseOptions::default();
        assert!(!options.allow_comments);
        assert_eq!(options.max_nesting_depth, 128);
    }

    #[test]
    fn test_relaxed_options() {
        let options = ParseOptions::relaxed();
        assert!(options.allow_comments);
        assert!(options.max_nesting_depth > ParseOptions::standard().max_nesting_depth);
    }
}
