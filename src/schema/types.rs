//! Wire base types and the field type-token grammar.

use std::fmt;

/// Fixed-width base types a field may carry on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// Unsigned 8-bit integer.
    UInt8,
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// Signed 64-bit integer.
    Int64,
    /// One byte of character data.
    Char,
    /// IEEE 754 binary32.
    Float,
    /// IEEE 754 binary64.
    Double,
}

impl BaseType {
    /// Wire size of one element in bytes.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::UInt8 | Self::Int8 | Self::Char => 1,
            Self::UInt16 | Self::Int16 => 2,
            Self::UInt32 | Self::Int32 | Self::Float => 4,
            Self::UInt64 | Self::Int64 | Self::Double => 8,
        }
    }

    /// Token this type contributes to a message signature.
    #[must_use]
    pub const fn wire_token(self) -> &'static str {
        match self {
            Self::UInt8 => "uint8_t",
            Self::Int8 => "int8_t",
            Self::UInt16 => "uint16_t",
            Self::Int16 => "int16_t",
            Self::UInt32 => "uint32_t",
            Self::Int32 => "int32_t",
            Self::UInt64 => "uint64_t",
            Self::Int64 => "int64_t",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Resolve a base token, honoring the dialect aliases
    /// (`uint8_t_mavlink_version` is a `uint8`, `array` an `int8`).
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "uint8_t" | "uint8" | "uint8_t_mavlink_version" => Some(Self::UInt8),
            "int8_t" | "int8" | "array" => Some(Self::Int8),
            "uint16_t" | "uint16" => Some(Self::UInt16),
            "int16_t" | "int16" => Some(Self::Int16),
            "uint32_t" | "uint32" => Some(Self::UInt32),
            "int32_t" | "int32" => Some(Self::Int32),
            "uint64_t" | "uint64" => Some(Self::UInt64),
            "int64_t" | "int64" => Some(Self::Int64),
            "char" => Some(Self::Char),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            _ => None,
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_token())
    }
}

/// Parsed form of a field type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType {
    /// Element type.
    pub base: BaseType,
    /// Declared element count; `None` for scalars.
    pub array_length: Option<usize>,
}

/// Parse `<base>` or `<base>[N]` with `N >= 1`.
///
/// Returns `None` for tokens outside the grammar.
#[must_use]
pub fn parse_type_token(token: &str) -> Option<FieldType> {
    match token.split_once('[') {
        Some((base, rest)) => {
            let count: usize = rest.strip_suffix(']')?.parse().ok()?;
            if count == 0 {
                return None;
            }
            Some(FieldType {
                base: BaseType::from_token(base)?,
                array_length: Some(count),
            })
        }
        None => Some(FieldType {
            base: BaseType::from_token(token)?,
            array_length: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_tokens_parse() {
        let parsed = parse_type_token("uint32_t").unwrap();
        assert_eq!(parsed.base, BaseType::UInt32);
        assert_eq!(parsed.array_length, None);
        assert_eq!(parse_type_token("double").unwrap().base, BaseType::Double);
    }

    #[test]
    fn array_tokens_parse() {
        let parsed = parse_type_token("char[16]").unwrap();
        assert_eq!(parsed.base, BaseType::Char);
        assert_eq!(parsed.array_length, Some(16));
        assert_eq!(
            parse_type_token("uint8_t[20]").unwrap().array_length,
            Some(20)
        );
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(
            parse_type_token("uint8_t_mavlink_version").unwrap().base,
            BaseType::UInt8
        );
        assert_eq!(parse_type_token("array").unwrap().base, BaseType::Int8);
        assert_eq!(parse_type_token("array[32]").unwrap().base, BaseType::Int8);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(parse_type_token("uint24_t").is_none());
        assert!(parse_type_token("uint8_t[0]").is_none());
        assert!(parse_type_token("uint8_t[x]").is_none());
        assert!(parse_type_token("uint8_t[4").is_none());
        assert!(parse_type_token("").is_none());
    }

    #[test]
    fn sizes_match_wire_widths() {
        assert_eq!(BaseType::UInt8.size(), 1);
        assert_eq!(BaseType::Char.size(), 1);
        assert_eq!(BaseType::Int16.size(), 2);
        assert_eq!(BaseType::Float.size(), 4);
        assert_eq!(BaseType::UInt64.size(), 8);
        assert_eq!(BaseType::Double.size(), 8);
    }

    #[test]
    fn signature_tokens_keep_c_spelling() {
        assert_eq!(BaseType::UInt32.wire_token(), "uint32_t");
        assert_eq!(BaseType::Char.wire_token(), "char");
        assert_eq!(BaseType::Float.to_string(), "float");
    }
}
