//! JSON writer.
//!
//! Depth-first serialization of a [`Variant`] tree. Only the quote character
//! is escaped inside strings, which keeps the output symmetric with the
//! parser's unescape step.
//!
//! Pretty output indents with tabs: a newline and `indent` tabs follow each
//! opener and each comma, and a newline plus `indent - 1` tabs precede the
//! closer. Compact output has no whitespace outside string literals.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::variant::{Dictionary, Variant};

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// No whitespace between tokens
    #[default]
    Compact,
    /// One element per line, tab indented
    Pretty,
}

/// Serialize a root dictionary, pretty-printed when `pretty` is set.
pub fn to_json(root: &Dictionary, pretty: bool) -> String {
    to_json_with(root, if pretty { Style::Pretty } else { Style::Compact })
}

/// Serialize a root dictionary in the given style.
pub fn to_json_with(root: &Dictionary, style: Style) -> String {
    let mut output = String::new();
    write_dictionary(root, &mut output, style, 1);
    debug!("wrote {} keys as {} bytes of JSON", root.len(), output.len());
    output
}

/// Append the JSON text of `value` to `output`.
///
/// `indent` is the nesting level of `value`'s contents; the root is written
/// at level 1.
///
/// Recurses once per nesting level. Parsed trees are bounded by
/// [`ParseOptions::max_nesting_depth`](crate::json::ParseOptions); a
/// hand-built tree thousands of levels deep can exhaust the stack.
pub fn write_value(value: &Variant, output: &mut String, style: Style, indent: usize) {
    match value {
        Variant::Pointer(_) => output.push_str("null"),
        Variant::Bool(b) => write_bool(*b, output),
        Variant::Int(n) => output.push_str(&n.to_string()),
        Variant::Float(x) => write_float(*x, output),
        Variant::String(s) => write_string(s, output),
        Variant::PointerArray(handles) => {
            write_sequence(handles, output, style, indent, |_, out, _| out.push_str("null"));
        }
        Variant::BoolArray(values) => {
            write_sequence(values, output, style, indent, |b, out, _| write_bool(*b, out));
        }
        Variant::ByteArray(values) => {
            write_sequence(values, output, style, indent, |b, out, _| {
                out.push_str(&b.to_string());
            });
        }
        Variant::IntArray(values) => {
            write_sequence(values, output, style, indent, |n, out, _| {
                out.push_str(&n.to_string());
            });
        }
        Variant::FloatArray(values) => {
            write_sequence(values, output, style, indent, |x, out, _| write_float(*x, out));
        }
        Variant::StringArray(values) => {
            write_sequence(values, output, style, indent, |s, out, _| write_string(s, out));
        }
        Variant::VariantArray(items) => {
            write_sequence(items, output, style, indent, |item, out, level| {
                write_value(item, out, style, level);
            });
        }
        Variant::Dictionary(map) => write_dictionary(map, output, style, indent),
    }
}

fn write_bool(value: bool, output: &mut String) {
    output.push_str(if value { "true" } else { "false" });
}

/// Shortest text that reads back to the same float.
///
/// Always contains `.` or `e`, so the parser classifies it as a float again.
/// NaN and infinities have no JSON form and are written as `null`.
fn write_float(value: f64, output: &mut String) {
    if value.is_finite() {
        output.push_str(&format!("{:?}", value));
    } else {
        output.push_str("null");
    }
}

/// Quote a string, escaping only `"`.
fn write_string(s: &str, output: &mut String) {
    output.push('"');
    for ch in s.chars() {
        if ch == '"' {
            output.push('\\');
        }
        output.push(ch);
    }
    output.push('"');
}

fn push_tabs(output: &mut String, count: usize) {
    output.extend(std::iter::repeat('\t').take(count));
}

/// Layout after an opening bracket.
fn open(output: &mut String, bracket: char, style: Style, indent: usize) {
    output.push(bracket);
    if style == Style::Pretty {
        output.push('\n');
        push_tabs(output, indent);
    }
}

/// Layout after an element: a separator, or the lead-in to the closer.
fn separate(output: &mut String, style: Style, indent: usize, last: bool) {
    match (style, last) {
        (Style::Compact, false) => output.push(','),
        (Style::Compact, true) => {}
        (Style::Pretty, false) => {
            output.push_str(",\n");
            push_tabs(output, indent);
        }
        (Style::Pretty, true) => {
            output.push('\n');
            push_tabs(output, indent.saturating_sub(1));
        }
    }
}

fn write_sequence<T>(
    items: &[T],
    output: &mut String,
    style: Style,
    indent: usize,
    mut write_item: impl FnMut(&T, &mut String, usize),
) {
    open(output, '[', style, indent);
    for (i, item) in items.iter().enumerate() {
        write_item(item, output, indent + 1);
        separate(output, style, indent, i + 1 == items.len());
    }
    output.push(']');
}

fn write_dictionary(map: &Dictionary, output: &mut String, style: Style, indent: usize) {
    open(output, '{', style, indent);
    for (i, (key, value)) in map.iter().enumerate() {
        write_string(key, output);
        output.push_str(match style {
            Style::Compact => ":",
            Style::Pretty => " : ",
        });
        write_value(value, output, style, indent + 1);
        separate(output, style, indent, i + 1 == map.len());
    }
    output.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(value: &Variant) -> String {
        let mut output = String::new();
        write_value(value, &mut output, Style::Compact, 1);
        output
    }

    fn dict(entries: Vec<(&str, Variant)>) -> Dictionary {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_write_scalars() {
        assert_eq!(compact(&Variant::null()), "null");
        assert_eq!(compact(&Variant::Bool(true)), "true");
        assert_eq!(compact(&Variant::Bool(false)), "false");
        assert_eq!(compact(&Variant::Int(-42)), "-42");
        assert_eq!(compact(&Variant::from("hi")), "\"hi\"");
    }

    #[test]
    fn test_write_floats() {
        assert_eq!(compact(&Variant::Float(3.0)), "3.0");
        assert_eq!(compact(&Variant::Float(0.1)), "0.1");
        assert_eq!(compact(&Variant::Float(-2.5)), "-2.5");
        assert_eq!(compact(&Variant::Float(1e300)), "1e300");
        assert_eq!(compact(&Variant::Float(f64::NAN)), "null");
        assert_eq!(compact(&Variant::Float(f64::INFINITY)), "null");
    }

    #[test]
    fn test_only_quotes_escaped() {
        assert_eq!(compact(&Variant::from("a\"b")), r#""a\"b""#);
        assert_eq!(compact(&Variant::from("a\\b\n")), "\"a\\b\n\"");
    }

    #[test]
    fn test_compact_containers() {
        let root = dict(vec![
            ("a", Variant::Int(1)),
            ("b", Variant::VariantArray(vec![Variant::Bool(true), Variant::null()])),
            ("c", Variant::Dictionary(Dictionary::new())),
            ("d", Variant::VariantArray(vec![])),
        ]);
        assert_eq!(
            to_json(&root, false),
            r#"{"a":1,"b":[true,null],"c":{},"d":[]}"#
        );
    }

    #[test]
    fn test_pretty_layout() {
        let root = dict(vec![
            ("a", Variant::Int(1)),
            ("b", Variant::VariantArray(vec![Variant::Int(2), Variant::Int(3)])),
        ]);
        assert_eq!(
            to_json(&root, true),
            "{\n\t\"a\" : 1,\n\t\"b\" : [\n\t\t2,\n\t\t3\n\t]\n}"
        );
    }

    #[test]
    fn test_pretty_empty_containers() {
        assert_eq!(to_json(&Dictionary::new(), true), "{\n\t}");
        let root = dict(vec![("e", Variant::VariantArray(vec![]))]);
        assert_eq!(to_json(&root, true), "{\n\t\"e\" : [\n\t\t]\n}");
    }

    #[test]
    fn test_typed_arrays_written_as_json_arrays() {
        assert_eq!(compact(&Variant::ByteArray(vec![0, 255])), "[0,255]");
        assert_eq!(compact(&Variant::IntArray(vec![-1, 2])), "[-1,2]");
        assert_eq!(compact(&Variant::FloatArray(vec![1.0, 0.5])), "[1.0,0.5]");
        assert_eq!(compact(&Variant::BoolArray(vec![true])), "[true]");
        assert_eq!(
            compact(&Variant::StringArray(vec!["x".to_string(), "\"".to_string()])),
            r#"["x","\""]"#
        );
        assert_eq!(
            compact(&Variant::PointerArray(vec![crate::variant::Handle::NULL])),
            "[null]"
        );
    }

    #[test]
    fn test_keys_escaped_and_ordered() {
        let root = dict(vec![("z", Variant::Int(1)), ("q\"k", Variant::Int(2))]);
        assert_eq!(to_json(&root, false), r#"{"z":1,"q\"k":2}"#);
    }
}
