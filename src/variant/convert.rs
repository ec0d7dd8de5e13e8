//! Typed read-back from [`Variant`] values.
//!
//! Reads are duck-typed: asking for a type the value does not hold yields
//! that type's default instead of an error. The full defaulting table is
//! encoded here and nowhere else:
//!
//! | target          | accepted kinds                      | otherwise |
//! |-----------------|-------------------------------------|-----------|
//! | `Handle`        | Pointer, Int (non-negative address)  | null      |
//! | `bool`          | Bool                                 | `false`   |
//! | `i64`           | Int, Float (rounded)                 | `0`       |
//! | `f64`           | Float, Int (widened)                 | `0.0`     |
//! | `String`        | String                               | `""`      |
//! | `Vec<T>` typed  | matching typed array, VariantArray   | empty     |
//! | `Vec<Variant>`  | VariantArray                         | empty     |
//! | `Dictionary`    | Dictionary                           | empty     |
//!
//! Typed arrays read out of a `VariantArray` convert each element with the
//! scalar rule above; bytes go through the `i64` rule and are truncated.

use super::{Dictionary, Handle, Variant};

/// Types that can be read out of a [`Variant`].
pub trait FromVariant: Sized + Default {
    /// Read the value, `None` when the variant's kind is not accepted.
    fn try_from_variant(variant: &Variant) -> Option<Self>;

    /// Read the value, falling back to `Self::default()` on a kind mismatch.
    fn from_variant(variant: &Variant) -> Self {
        Self::try_from_variant(variant).unwrap_or_default()
    }
}

impl FromVariant for Handle {
    fn try_from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Pointer(handle) => Some(*handle),
            Variant::Int(address) => usize::try_from(*address).ok().map(Handle::from_address),
            _ => None,
        }
    }
}

impl FromVariant for bool {
    fn try_from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromVariant for i64 {
    fn try_from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Int(value) => Some(*value),
            // Round first so 7.9 reads as 8, not 7.
            Variant::Float(value) => Some(value.round() as i64),
            _ => None,
        }
    }
}

impl FromVariant for f64 {
    fn try_from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Float(value) => Some(*value),
            Variant::Int(value) => Some(*value as f64),
            _ => None,
        }
    }
}

impl FromVariant for String {
    fn try_from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::String(value) => Some(value.clone()),
            _ => None,
        }
    }
}

macro_rules! typed_array {
    ($elem:ty, $kind:ident, $convert:expr) => {
        impl FromVariant for Vec<$elem> {
            fn try_from_variant(variant: &Variant) -> Option<Self> {
                match variant {
                    Variant::$kind(values) => Some(values.clone()),
                    Variant::VariantArray(items) => Some(items.iter().map($convert).collect()),
                    _ => None,
                }
            }
        }
    };
}

typed_array!(Handle, PointerArray, Handle::from_variant);
typed_array!(bool, BoolArray, bool::from_variant);
typed_array!(u8, ByteArray, |item: &Variant| i64::from_variant(item) as u8);
typed_array!(i64, IntArray, i64::from_variant);
typed_array!(f64, FloatArray, f64::from_variant);
typed_array!(String, StringArray, String::from_variant);

impl FromVariant for Vec<Variant> {
    fn try_from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::VariantArray(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl FromVariant for Dictionary {
    fn try_from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Dictionary(map) => Some(map.clone()),
            _ => None,
        }
    }
}
