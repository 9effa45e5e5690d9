//! Field values exchanged across the codec boundary.

use std::collections::HashMap;

use crate::schema::BaseType;

use super::wire;

/// One numeric wire element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// Unsigned 8-bit integer.
    UInt8(u8),
    /// Signed 8-bit integer.
    Int8(i8),
    /// Unsigned 16-bit integer.
    UInt16(u16),
    /// Signed 16-bit integer.
    Int16(i16),
    /// Unsigned 32-bit integer.
    UInt32(u32),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Unsigned 64-bit integer.
    UInt64(u64),
    /// Signed 64-bit integer.
    Int64(i64),
    /// IEEE 754 binary32.
    Float(f32),
    /// IEEE 754 binary64.
    Double(f64),
}

impl Scalar {
    #[allow(clippy::cast_possible_truncation)]
    fn as_i128(self) -> i128 {
        match self {
            Self::UInt8(v) => i128::from(v),
            Self::Int8(v) => i128::from(v),
            Self::UInt16(v) => i128::from(v),
            Self::Int16(v) => i128::from(v),
            Self::UInt32(v) => i128::from(v),
            Self::Int32(v) => i128::from(v),
            Self::UInt64(v) => i128::from(v),
            Self::Int64(v) => i128::from(v),
            Self::Float(v) => v as i128,
            Self::Double(v) => v as i128,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Self::UInt8(v) => f64::from(v),
            Self::Int8(v) => f64::from(v),
            Self::UInt16(v) => f64::from(v),
            Self::Int16(v) => f64::from(v),
            Self::UInt32(v) => f64::from(v),
            Self::Int32(v) => f64::from(v),
            Self::UInt64(v) => v as f64,
            Self::Int64(v) => v as f64,
            Self::Float(v) => f64::from(v),
            Self::Double(v) => v,
        }
    }

    /// Serialize the value as `base` at `offset`, converting with cast
    /// semantics when the supplied width differs from the wire width.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    pub(crate) fn write(self, base: BaseType, buf: &mut [u8], offset: usize) {
        match base {
            BaseType::UInt8 | BaseType::Char => wire::put_u8(buf, offset, self.as_i128() as u8),
            BaseType::Int8 => wire::put_i8(buf, offset, self.as_i128() as i8),
            BaseType::UInt16 => wire::put_u16(buf, offset, self.as_i128() as u16),
            BaseType::Int16 => wire::put_i16(buf, offset, self.as_i128() as i16),
            BaseType::UInt32 => wire::put_u32(buf, offset, self.as_i128() as u32),
            BaseType::Int32 => wire::put_i32(buf, offset, self.as_i128() as i32),
            BaseType::UInt64 => wire::put_u64(buf, offset, self.as_i128() as u64),
            BaseType::Int64 => wire::put_i64(buf, offset, self.as_i128() as i64),
            BaseType::Float => wire::put_f32(buf, offset, self.as_f64() as f32),
            BaseType::Double => wire::put_f64(buf, offset, self.as_f64()),
        }
    }

    /// Deserialize one element of `base` from `offset`.
    pub(crate) fn read(base: BaseType, buf: &[u8], offset: usize) -> Self {
        match base {
            BaseType::UInt8 | BaseType::Char => Self::UInt8(wire::get_u8(buf, offset)),
            BaseType::Int8 => Self::Int8(wire::get_i8(buf, offset)),
            BaseType::UInt16 => Self::UInt16(wire::get_u16(buf, offset)),
            BaseType::Int16 => Self::Int16(wire::get_i16(buf, offset)),
            BaseType::UInt32 => Self::UInt32(wire::get_u32(buf, offset)),
            BaseType::Int32 => Self::Int32(wire::get_i32(buf, offset)),
            BaseType::UInt64 => Self::UInt64(wire::get_u64(buf, offset)),
            BaseType::Int64 => Self::Int64(wire::get_i64(buf, offset)),
            BaseType::Float => Self::Float(wire::get_f32(buf, offset)),
            BaseType::Double => Self::Double(wire::get_f64(buf, offset)),
        }
    }
}

macro_rules! scalar_from {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$native> for Scalar {
                fn from(value: $native) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<$native> for FieldValue {
                fn from(value: $native) -> Self {
                    Self::Scalar(Scalar::$variant(value))
                }
            }
        )*
    };
}

scalar_from! {
    u8 => UInt8,
    i8 => Int8,
    u16 => UInt16,
    i16 => Int16,
    u32 => UInt32,
    i32 => Int32,
    u64 => UInt64,
    i64 => Int64,
    f32 => Float,
    f64 => Double,
}

/// Value supplied to the builder or produced by the parser for one
/// field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A single numeric element.
    Scalar(Scalar),
    /// An ordered sequence of numeric elements.
    Array(Vec<Scalar>),
    /// A char-array value (trimmed of trailing zero bytes on decode).
    Text(String),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T> From<Vec<T>> for FieldValue
where
    Scalar: From<T>,
{
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Scalar::from).collect())
    }
}

/// Decoded or to-be-encoded field values keyed by field name.
pub type FieldMap = HashMap<String, FieldValue>;

/// Build a [`FieldMap`] from `(name, value)` pairs.
#[must_use]
pub fn fields<const N: usize>(entries: [(&str, FieldValue); N]) -> FieldMap {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value))
        .collect()
}
