//! Dynamically-typed values.
//!
//! A [`Variant`] holds exactly one of a closed set of kinds: scalars stored
//! inline, strings and typed arrays on the heap, and two recursive
//! containers ([`Variant::VariantArray`] and [`Variant::Dictionary`]) that
//! carry every tree structure the JSON codec produces.
//!
//! Ownership follows Rust's rules: a variant owns its payload, `clone` deep
//! copies it and a move transfers it. [`Variant::take`] moves a value out of
//! a mutable slot and leaves the default (`Int(0)`) behind.
//!
//! # Example
//!
//! ```
//! use variant_json::{Dictionary, Kind, Variant};
//!
//! let mut map = Dictionary::new();
//! map.insert("answer".to_string(), Variant::Int(42));
//! let value = Variant::from(map);
//!
//! assert_eq!(value.kind(), Kind::Dictionary);
//! assert_eq!(value.get("answer").map(|v| v.read::<f64>()), Some(42.0));
//! assert_eq!(value.get("answer").map(|v| v.read::<String>()), Some(String::new()));
//! ```

mod convert;
mod kind;

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

pub use convert::FromVariant;
pub use kind::Kind;

use crate::json::{write_value, Style};

/// String-keyed map of variants. Keys are unique and keep insertion order.
pub type Dictionary = IndexMap<String, Variant>;

/// Opaque pointer-sized handle stored by [`Variant::Pointer`].
///
/// Only the address is kept, never dereferenced, so variants stay `Send`
/// and `Sync`. Address 0 is the null handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(usize);

impl Handle {
    /// The null handle.
    pub const NULL: Handle = Handle(0);

    /// Wrap a raw address.
    pub const fn from_address(address: usize) -> Self {
        Handle(address)
    }

    /// The wrapped address.
    pub const fn address(self) -> usize {
        self.0
    }

    /// Returns true for the null handle.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl<T> From<*const T> for Handle {
    fn from(pointer: *const T) -> Self {
        Handle(pointer as usize)
    }
}

impl<T> From<*mut T> for Handle {
    fn from(pointer: *mut T) -> Self {
        Handle(pointer as usize)
    }
}

/// A dynamically-typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// Opaque handle; the null handle is JSON `null`
    Pointer(Handle),
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Owned string
    String(String),
    /// Array of handles
    PointerArray(Vec<Handle>),
    /// Array of booleans
    BoolArray(Vec<bool>),
    /// Array of bytes
    ByteArray(Vec<u8>),
    /// Array of integers
    IntArray(Vec<i64>),
    /// Array of floats
    FloatArray(Vec<f64>),
    /// Array of strings
    StringArray(Vec<String>),
    /// Ordered sequence of variants (JSON array)
    VariantArray(Vec<Variant>),
    /// String-keyed map of variants (JSON object)
    Dictionary(Dictionary),
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Int(0)
    }
}

impl Variant {
    /// A null pointer value, written as JSON `null`.
    pub const fn null() -> Self {
        Variant::Pointer(Handle::NULL)
    }

    /// The kind of this value. Never `Kind::Unknown`.
    pub fn kind(&self) -> Kind {
        match self {
            Variant::Pointer(_) => Kind::Pointer,
            Variant::Bool(_) => Kind::Bool,
            Variant::Int(_) => Kind::Int,
            Variant::Float(_) => Kind::Float,
            Variant::String(_) => Kind::String,
            Variant::PointerArray(_) => Kind::PointerArray,
            Variant::BoolArray(_) => Kind::BoolArray,
            Variant::ByteArray(_) => Kind::ByteArray,
            Variant::IntArray(_) => Kind::IntArray,
            Variant::FloatArray(_) => Kind::FloatArray,
            Variant::StringArray(_) => Kind::StringArray,
            Variant::VariantArray(_) => Kind::VariantArray,
            Variant::Dictionary(_) => Kind::Dictionary,
        }
    }

    /// Move the value out, leaving the default `Int(0)` in its place.
    pub fn take(&mut self) -> Variant {
        std::mem::take(self)
    }

    /// Read the value as `T`, defaulting on a kind mismatch.
    ///
    /// See [`FromVariant`] for the accepted kinds per target type.
    pub fn read<T: FromVariant>(&self) -> T {
        T::from_variant(self)
    }

    /// Read the value as `T`, `None` on a kind mismatch.
    pub fn try_read<T: FromVariant>(&self) -> Option<T> {
        T::try_from_variant(self)
    }

    /// Returns true for a null pointer.
    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Pointer(handle) if handle.is_null())
    }

    /// Returns true if this is a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self, Variant::Bool(_))
    }

    /// Returns true if this is an integer or a float.
    pub fn is_number(&self) -> bool {
        matches!(self, Variant::Int(_) | Variant::Float(_))
    }

    /// Returns true if this is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Variant::String(_))
    }

    /// Returns true if this is a variant sequence.
    pub fn is_array(&self) -> bool {
        matches!(self, Variant::VariantArray(_))
    }

    /// Returns true if this is a dictionary.
    pub fn is_dictionary(&self) -> bool {
        matches!(self, Variant::Dictionary(_))
    }

    /// Returns the boolean if this is a Bool.
    pub fn as_bool(&self) -> Option<bool> {
        self.try_read()
    }

    /// Returns the integer, rounding a Float.
    pub fn as_i64(&self) -> Option<i64> {
        self.try_read()
    }

    /// Returns the float, widening an Int.
    pub fn as_f64(&self) -> Option<f64> {
        self.try_read()
    }

    /// Returns a reference to the string if this is a String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is a variant sequence.
    pub fn as_array(&self) -> Option<&[Variant]> {
        match self {
            Variant::VariantArray(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable access to the elements of a variant sequence.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Variant>> {
        match self {
            Variant::VariantArray(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the map if this is a dictionary.
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Variant::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    /// Mutable access to the map of a dictionary.
    pub fn as_dictionary_mut(&mut self) -> Option<&mut Dictionary> {
        match self {
            Variant::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    /// Get a value from a dictionary by key.
    pub fn get(&self, key: &str) -> Option<&Variant> {
        self.as_dictionary().and_then(|map| map.get(key))
    }

    /// Get a value from a variant sequence by index.
    pub fn get_index(&self, index: usize) -> Option<&Variant> {
        self.as_array().and_then(|items| items.get(index))
    }
}

macro_rules! from_payload {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Variant {
                fn from(value: $ty) -> Self {
                    Variant::$variant(value)
                }
            }
        )*
    };
}

from_payload!(
    Handle => Pointer,
    bool => Bool,
    i64 => Int,
    f64 => Float,
    String => String,
    Vec<Handle> => PointerArray,
    Vec<bool> => BoolArray,
    Vec<u8> => ByteArray,
    Vec<i64> => IntArray,
    Vec<f64> => FloatArray,
    Vec<String> => StringArray,
    Vec<Variant> => VariantArray,
    Dictionary => Dictionary,
);

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

impl FromIterator<Variant> for Variant {
    fn from_iter<I: IntoIterator<Item = Variant>>(iter: I) -> Self {
        Variant::VariantArray(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Variant)> for Variant {
    fn from_iter<I: IntoIterator<Item = (String, Variant)>>(iter: I) -> Self {
        Variant::Dictionary(iter.into_iter().collect())
    }
}

/// Formats the value as compact JSON.
impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        write_value(self, &mut output, Style::Compact, 1);
        f.write_str(&output)
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Variant::Pointer(_) => serializer.serialize_unit(),
            Variant::Bool(value) => serializer.serialize_bool(*value),
            Variant::Int(value) => serializer.serialize_i64(*value),
            Variant::Float(value) => serializer.serialize_f64(*value),
            Variant::String(value) => serializer.serialize_str(value),
            Variant::PointerArray(values) => serializer.collect_seq(values.iter().map(|_| ())),
            Variant::BoolArray(values) => serializer.collect_seq(values),
            Variant::ByteArray(values) => serializer.collect_seq(values),
            Variant::IntArray(values) => serializer.collect_seq(values),
            Variant::FloatArray(values) => serializer.collect_seq(values),
            Variant::StringArray(values) => serializer.collect_seq(values),
            Variant::VariantArray(items) => serializer.collect_seq(items),
            Variant::Dictionary(map) => serializer.collect_map(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Variant::null().kind(), Kind::Pointer);
        assert_eq!(Variant::from(true).kind(), Kind::Bool);
        assert_eq!(Variant::from(1_i64).kind(), Kind::Int);
        assert_eq!(Variant::from(1.5).kind(), Kind::Float);
        assert_eq!(Variant::from("s").kind(), Kind::String);
        assert_eq!(Variant::from(vec![Handle::NULL]).kind(), Kind::PointerArray);
        assert_eq!(Variant::from(vec![true]).kind(), Kind::BoolArray);
        assert_eq!(Variant::from(vec![1_u8]).kind(), Kind::ByteArray);
        assert_eq!(Variant::from(vec![1_i64]).kind(), Kind::IntArray);
        assert_eq!(Variant::from(vec![1.0]).kind(), Kind::FloatArray);
        assert_eq!(Variant::from(vec!["a".to_string()]).kind(), Kind::StringArray);
        assert_eq!(Variant::from(Vec::<Variant>::new()).kind(), Kind::VariantArray);
        assert_eq!(Variant::from(Dictionary::new()).kind(), Kind::Dictionary);
    }

    #[test]
    fn test_default_is_zero_int() {
        assert_eq!(Variant::default(), Variant::Int(0));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original: Variant = vec![Variant::from("a")].into_iter().collect();
        let copy = original.clone();
        if let Some(items) = original.as_array_mut() {
            items.push(Variant::Int(2));
        }
        assert_eq!(copy.as_array().map(<[Variant]>::len), Some(1));
        assert_eq!(original.as_array().map(<[Variant]>::len), Some(2));
    }

    #[test]
    fn test_take_leaves_default() {
        let mut slot = Variant::from("payload");
        let moved = slot.take();
        assert_eq!(moved, Variant::from("payload"));
        assert_eq!(slot, Variant::Int(0));
    }

    #[test]
    fn test_null_detection() {
        assert!(Variant::null().is_null());
        assert!(!Variant::Pointer(Handle::from_address(8)).is_null());
        assert!(!Variant::Int(0).is_null());
    }

    #[test]
    fn test_handle_from_raw_pointer() {
        let value = 7_u32;
        let handle = Handle::from(&value as *const u32);
        assert!(!handle.is_null());
        assert_eq!(handle.address(), &value as *const u32 as usize);
    }

    #[test]
    fn test_lookups() {
        let value: Variant = [("k".to_string(), Variant::from(vec![Variant::Bool(true)]))]
            .into_iter()
            .collect();
        assert_eq!(
            value.get("k").and_then(|v| v.get_index(0)),
            Some(&Variant::Bool(true))
        );
        assert_eq!(value.get("missing"), None);
        assert_eq!(Variant::Int(1).get("k"), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Variant::Float(2.4).as_i64(), Some(2));
        assert_eq!(Variant::Int(2).as_f64(), Some(2.0));
        assert_eq!(Variant::from("s").as_str(), Some("s"));
        assert_eq!(Variant::Int(1).as_bool(), None);
        assert!(Variant::Int(1).is_number());
        assert!(Variant::from(Dictionary::new()).is_dictionary());
    }

    #[test]
    fn test_display_is_compact_json() {
        let value: Variant = vec![Variant::Int(1), Variant::from("a\"b"), Variant::null()]
            .into_iter()
            .collect();
        assert_eq!(value.to_string(), r#"[1,"a\"b",null]"#);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_variant_is_send_sync() {
        assert_send_sync::<Variant>();
    }
}
