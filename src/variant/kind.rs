//! Kind discriminant for [`Variant`](super::Variant) values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of kinds a [`Variant`](super::Variant) can report.
///
/// Tag numbers are stable. `Unknown` is a sentinel: no value ever has it,
/// it only comes back from [`Kind::from_tag`] for out-of-range tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Kind {
    /// Sentinel for unrecognized tags
    Unknown = 0,
    /// Opaque pointer-sized handle
    Pointer = 1,
    /// Boolean
    Bool = 2,
    /// 64-bit signed integer
    Int = 3,
    /// 64-bit float
    Float = 4,
    /// Owned string
    String = 5,
    /// Array of handles
    PointerArray = 6,
    /// Array of booleans
    BoolArray = 7,
    /// Array of bytes
    ByteArray = 8,
    /// Array of integers
    IntArray = 9,
    /// Array of floats
    FloatArray = 10,
    /// Array of strings
    StringArray = 11,
    /// Ordered sequence of variants
    VariantArray = 12,
    /// String-keyed map of variants
    Dictionary = 13,
}

impl Kind {
    /// Number of tags, one past the highest valid tag.
    pub const COUNT: usize = 14;

    /// Every kind in tag order.
    pub const ALL: [Kind; Kind::COUNT] = [
        Kind::Unknown,
        Kind::Pointer,
        Kind::Bool,
        Kind::Int,
        Kind::Float,
        Kind::String,
        Kind::PointerArray,
        Kind::BoolArray,
        Kind::ByteArray,
        Kind::IntArray,
        Kind::FloatArray,
        Kind::StringArray,
        Kind::VariantArray,
        Kind::Dictionary,
    ];

    /// Numeric tag of this kind.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Look up a kind by tag, `Unknown` when out of range.
    pub fn from_tag(tag: u8) -> Kind {
        Kind::ALL
            .get(usize::from(tag))
            .copied()
            .unwrap_or(Kind::Unknown)
    }

    /// Name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Unknown => "unknown",
            Kind::Pointer => "pointer",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::PointerArray => "pointer_array",
            Kind::BoolArray => "bool_array",
            Kind::ByteArray => "byte_array",
            Kind::IntArray => "int_array",
            Kind::FloatArray => "float_array",
            Kind::StringArray => "string_array",
            Kind::VariantArray => "variant_array",
            Kind::Dictionary => "dictionary",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
